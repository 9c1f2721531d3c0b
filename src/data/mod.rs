//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models so the
//! service layer never handles database representations directly.

pub mod lobby_signup;
pub mod signup;
pub mod stream_announcement;

#[cfg(test)]
mod test;
