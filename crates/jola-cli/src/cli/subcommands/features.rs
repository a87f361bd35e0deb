use clap::Subcommand;

/// Feature request commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FeatureCommands {
    /// List feature requests.
    List,
    /// Evidence supporting one feature request.
    Evidence { id: String },
}
