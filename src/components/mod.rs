pub mod adder;
pub mod bus;
pub mod mux;
