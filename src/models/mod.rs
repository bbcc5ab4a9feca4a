pub mod host_model;
