pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ChatBackend, ChatSession, ChatSessionGateway, ConverseUseCase, LanguageService,
    PersonaGateway, SessionConfig, DEFAULT_MAX_OUTPUT_TOKENS,
};

pub use cli::Commands;

pub use connector::{
    build_router, AppState, Container, ContainerConfig, GeminiLanguageService,
    HttpGatewayClient, MockLanguageService, Router,
};

pub use domain::{
    normalize, segment, CanonicalHistoryEntry, DomainError, GatewayError, Part, Persona, Role,
    Segment, Transcript, TranscriptAction, Turn, WireTurn,
};
