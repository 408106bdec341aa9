pub mod int_ring;
pub mod ring_element;
pub mod tensor;
