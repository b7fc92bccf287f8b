pub mod capture;
pub mod context;
pub mod mutation;
pub mod record;
pub mod wireframe;
