pub mod adaboost;
pub mod gbdt;
pub mod linear;
pub mod random_forest;
pub mod svr;
pub mod utils;

pub mod factory;
pub mod pipeline;
pub mod regressor_trait;
