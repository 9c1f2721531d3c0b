pub mod signup;
pub mod stream;
