pub use super::lobby::Entity as Lobby;
pub use super::lobby_signup::Entity as LobbySignup;
pub use super::signup::Entity as Signup;
pub use super::stream_announcement::Entity as StreamAnnouncement;
