//! Factory methods for creating test data.
//!
//! Each table has a `Factory` struct for customization and a `create_*` convenience
//! function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let signup = factory::signup::create_signup(&db).await?;
//!
//! let signup = factory::signup::SignupFactory::new(&db)
//!     .discord_id(42)
//!     .country_code("NZ")
//!     .build()
//!     .await?;
//! ```

pub mod helpers;
pub mod lobby;
pub mod signup;
