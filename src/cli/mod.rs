use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Print a content document as JSON (the contact document is seeded on first read)
    Show { key: String },

    /// Merge the conventional defaults into a fixed-id document; safe to repeat
    Seed {
        #[arg(default_value = "contact")]
        key: String,
    },

    /// Create the singleton document or update it when its id is given
    Set {
        key: String,

        /// Id of the existing document, if already known
        #[arg(long)]
        id: Option<String>,

        /// Fields as name=value; quote a value in double quotes to keep it as text
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Update fields of a fixed-id document (e.g. contact)
    Update {
        key: String,

        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Serve the content API over HTTP
    Serve {
        #[arg(long, default_value = "8787")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1
        #[arg(long)]
        public: bool,
    },
}
