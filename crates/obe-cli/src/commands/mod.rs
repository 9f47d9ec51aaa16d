pub mod articulation;
pub mod course;
pub mod department;
pub mod dispatch;
pub mod matrix;
pub mod program;
pub mod schema;
pub mod validate;
