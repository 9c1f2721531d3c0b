use crate::{data::signup::SignupRepository, model::signup::CreateSignupParam};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory::signup::SignupFactory};

mod create;
mod exists;
mod find_by_discord_id;
