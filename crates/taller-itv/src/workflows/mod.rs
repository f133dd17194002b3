pub mod itv;
