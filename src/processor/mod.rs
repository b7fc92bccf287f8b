pub mod bounds;
pub mod flattener;
pub mod mutation_resolver;
pub mod recorded_data;
pub mod wireframe_utils;
