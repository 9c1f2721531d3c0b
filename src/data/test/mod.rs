mod lobby_signup;
mod signup;
mod stream_announcement;
