pub mod dedup;
pub mod packed_vertex;
pub mod triangulate;

#[cfg(test)]
mod tests;
