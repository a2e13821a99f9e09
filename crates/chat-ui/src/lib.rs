pub mod state;
pub mod theme;
pub mod panels;

#[cfg(test)]
mod tests;
