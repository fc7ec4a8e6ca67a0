//! Infrastructure modules registered with the container

pub mod domains;
