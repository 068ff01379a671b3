pub mod diseases;
pub mod health;
pub mod index;
pub mod model;
pub mod predict;

#[cfg(test)]
pub(crate) mod testing;
