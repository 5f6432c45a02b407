use clap::Subcommand;

/// Gateway URL used by `chat --remote` when none is given.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000/chat";

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP chat gateway (POST /chat, GET /health)
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "5000")]
        port: u16,

        /// Address to bind to
        #[arg(short, long, env = "BIND", default_value = "0.0.0.0")]
        bind: String,
    },

    /// Chat from the terminal
    Chat {
        /// Send messages to a running gateway instead of calling the model directly.
        /// Without a URL, uses http://localhost:5000/chat
        #[arg(
            long,
            visible_alias = "remote",
            env = "FARMABOT_BACKEND_URL",
            num_args = 0..=1,
            default_missing_value = DEFAULT_BACKEND_URL
        )]
        server: Option<String>,
    },
}
