pub mod comm_trait;
pub mod test_comm;
pub mod test_dealer;
pub mod triple_trait;
