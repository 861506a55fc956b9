pub mod cloud;
pub mod momentum;
pub mod scorer;
pub mod volume_flow;
