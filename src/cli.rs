// CLI module for argument parsing and configuration

use crate::domain::SortOrder;
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// picsweep - triage your photo library in the terminal
///
/// Media comes up one card at a time: keep what you love, trash what you
/// don't, then review and commit the batch.
#[derive(Parser, Debug, Clone)]
#[command(name = "picsweep")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory containing the media library
    ///
    /// If not specified, defaults to the current directory.
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Presentation order for the session
    #[arg(short = 'o', long = "order", value_enum, default_value = "chrono")]
    pub order: OrderArg,

    /// Dry run mode - walk through the whole flow without deleting anything
    #[arg(short = 'n', long = "dry-run", action = ArgAction::SetTrue)]
    pub dry_run: bool,

    /// Include days that were already shown in an earlier session
    #[arg(long = "include-viewed", action = ArgAction::SetTrue)]
    pub include_viewed: bool,

    /// Delete permanently instead of moving to the system trash bin
    #[arg(long = "permanent", action = ArgAction::SetTrue)]
    pub permanent: bool,

    /// Skip the commit confirmation dialog
    #[arg(short = 'y', long = "yes", action = ArgAction::SetTrue)]
    pub skip_confirm: bool,

    /// Show the welcome screen even if it was dismissed before
    #[arg(long = "welcome", action = ArgAction::SetTrue)]
    pub show_welcome: bool,
}

/// Presentation order options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OrderArg {
    /// Newest capture first
    #[default]
    Chrono,
    /// Random day order, random within each day
    RandomDay,
}

impl From<OrderArg> for SortOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Chrono => SortOrder::Chronological,
            OrderArg::RandomDay => SortOrder::RandomizedByDay,
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the arguments and return any errors
    pub fn validate(&self) -> Result<(), String> {
        if !self.directory.exists() {
            return Err(format!(
                "Directory does not exist: {}",
                self.directory.display()
            ));
        }

        if !self.directory.is_dir() {
            return Err(format!(
                "Path is not a directory: {}",
                self.directory.display()
            ));
        }

        Ok(())
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub directory: PathBuf,
    pub order: SortOrder,
    pub dry_run: bool,
    pub include_viewed: bool,
    pub permanent: bool,
    pub skip_confirm: bool,
    pub show_welcome: bool,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        AppConfig {
            directory: args.directory,
            order: args.order.into(),
            dry_run: args.dry_run,
            include_viewed: args.include_viewed,
            permanent: args.permanent,
            skip_confirm: args.skip_confirm,
            show_welcome: args.show_welcome,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            directory: PathBuf::from("."),
            order: SortOrder::Chronological,
            dry_run: false,
            include_viewed: false,
            permanent: false,
            skip_confirm: false,
            show_welcome: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_for(directory: &str) -> Args {
        Args {
            directory: PathBuf::from(directory),
            order: OrderArg::Chrono,
            dry_run: false,
            include_viewed: false,
            permanent: false,
            skip_confirm: false,
            show_welcome: false,
        }
    }

    #[test]
    fn test_order_conversion() {
        assert_eq!(SortOrder::from(OrderArg::Chrono), SortOrder::Chronological);
        assert_eq!(
            SortOrder::from(OrderArg::RandomDay),
            SortOrder::RandomizedByDay
        );
    }

    #[test]
    fn test_validate_nonexistent_directory() {
        let args = args_for("/nonexistent/path/12345");
        let result = args.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("does not exist"));
    }

    #[test]
    fn test_validate_file_is_not_a_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let args = args_for(file.path().to_str().unwrap());
        let result = args.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("not a directory"));
    }

    #[test]
    fn test_validate_success() {
        let args = args_for(".");
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_app_config_from_args() {
        let mut args = args_for("/photos");
        args.order = OrderArg::RandomDay;
        args.dry_run = true;
        args.permanent = true;

        let config: AppConfig = args.into();

        assert_eq!(config.directory, PathBuf::from("/photos"));
        assert_eq!(config.order, SortOrder::RandomizedByDay);
        assert!(config.dry_run);
        assert!(config.permanent);
        assert!(!config.skip_confirm);
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.directory, PathBuf::from("."));
        assert_eq!(config.order, SortOrder::Chronological);
        assert!(!config.dry_run);
        assert!(!config.include_viewed);
    }
}
