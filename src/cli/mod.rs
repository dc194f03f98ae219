use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP chat relay
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "3000")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the relay on all network interfaces
        #[arg(long)]
        public: bool,
    },

    /// Relay a single question and print the reply
    Ask {
        message: String,

        /// One of general, quran, hadith, fiqh (anything else means general)
        #[arg(short, long, default_value = "general")]
        mode: String,
    },

    /// List the available modes
    Modes,
}
