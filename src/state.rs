//! Application state shared across the Discord handlers, the callback receiver and the
//! scheduler.
//!
//! The state is built once during startup. Every field is cheap to clone: services hold
//! their collaborators behind `Arc`s and the database connection is a pool.

use oauth2::basic::{BasicErrorResponseType, BasicTokenType};
use oauth2::{
    Client, EmptyExtraTokenFields, EndpointNotSet, EndpointSet, RevocationErrorResponseType,
    StandardErrorResponse, StandardRevocableToken, StandardTokenIntrospectionResponse,
    StandardTokenResponse,
};

use crate::service::{
    incident::IncidentReporter, lobby::LobbyService, oauth::OsuIdentityClient,
    signup::prompt::PromptTracker, signup::SignupService,
};

/// OAuth2 client for the osu! authorization code flow.
///
/// Authorization and token endpoints set.
pub(crate) type OAuth2Client = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// OAuth2 client for the Twitch client-credentials grant.
///
/// Only the token endpoint is set.
pub(crate) type TwitchOAuthClient = Client<
    StandardErrorResponse<BasicErrorResponseType>,
    StandardTokenResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardTokenIntrospectionResponse<EmptyExtraTokenFields, BasicTokenType>,
    StandardRevocableToken,
    StandardErrorResponse<RevocationErrorResponseType>,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// Shared state handed to the Discord event handler.
#[derive(Clone)]
pub struct AppState {
    /// Signup reconciliation, also used to check registrations and issue state tokens.
    pub signup: SignupService,

    /// osu! OAuth client, used to build authorization URLs for prompts.
    pub identity: OsuIdentityClient,

    /// Users recently sent a registration prompt.
    pub prompts: PromptTracker,

    /// Qualifier lobby signups.
    pub lobbies: LobbyService,

    /// Reports unexpected failures to the operator channel.
    pub incidents: IncidentReporter,

    /// Shown in the prompt footer, e.g. "June 15th".
    pub signup_close_text: String,

    /// Message whose reactions trigger registration prompts.
    pub registration_message_id: Option<u64>,

    /// Discord user allowed to run operator commands.
    pub owner_id: Option<u64>,

    /// Role toggled by `!streamping`.
    pub stream_ping_role_id: Option<u64>,
}
