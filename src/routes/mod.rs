pub mod default_route;
pub mod execute_route;
