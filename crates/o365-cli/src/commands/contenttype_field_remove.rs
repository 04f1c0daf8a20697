//! Content type field remove command - remove a field link from a content type.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use owo_colors::OwoColorize;

use o365_spo::{RemoveFieldLinkOptions, Session, SpoClient, remove_field_link};

use crate::Config;

/// Arguments for the content type field remove command.
#[derive(Debug, Args)]
pub struct FieldRemoveArgs {
    /// Absolute URL of the web where the content type is located.
    #[arg(long, short = 'u')]
    pub web_url: String,

    /// ID of the content type to remove the field link from.
    #[arg(long, short = 'i')]
    pub content_type_id: String,

    /// ID of the field link to remove.
    #[arg(long, short = 'f')]
    pub field_link_id: String,

    /// Update child content types.
    #[arg(long, short = 'c')]
    pub update_child_content_types: bool,
}

impl FieldRemoveArgs {
    /// Validates the raw arguments.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid web URL, content type id or
    /// field link id.
    pub fn options(&self) -> o365_core::Result<RemoveFieldLinkOptions> {
        RemoveFieldLinkOptions::parse(
            Some(&self.web_url),
            Some(&self.content_type_id),
            Some(&self.field_link_id),
            self.update_child_content_types,
        )
    }
}

/// Execute the content type field remove command.
///
/// Arguments are validated before a session is connected, so malformed
/// input never causes a network call.
///
/// # Errors
///
/// Returns an error if validation fails, no session can be connected, or
/// SharePoint rejects the request.
pub async fn execute(args: FieldRemoveArgs, config: &Config) -> Result<()> {
    let options = args.options()?;
    let (client, session) = super::connect(config).await?;
    run(&client, &session, &options, config, &mut std::io::stdout()).await
}

/// Removes the field link and reports completion to `out`.
///
/// Writes nothing on success unless `--debug` or `--verbose` is set, in
/// which case a green `DONE` line is written.
///
/// # Errors
///
/// Returns an error if SharePoint rejects the request or `out` cannot be
/// written to.
pub async fn run(
    client: &SpoClient,
    session: &Session,
    options: &RemoveFieldLinkOptions,
    config: &Config,
    out: &mut impl Write,
) -> Result<()> {
    tracing::debug!(
        web_url = %options.web_url,
        content_type = %options.content_type_id,
        field_link = %options.field_link_id,
        update_children = options.update_child_content_types,
        "removing field link"
    );
    remove_field_link(client, session, options).await?;

    if config.reports_progress() {
        writeln!(out, "{}", "DONE".green()).context("failed to write output")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: FieldRemoveArgs,
    }

    #[test]
    fn test_field_remove_args_parsing() {
        let cli = TestCli::parse_from([
            "test",
            "-u",
            "https://contoso.sharepoint.com",
            "-i",
            "0x0100558D85B7216F6A489A499DB361E1AE2F",
            "-f",
            "5ee2dd25-d941-455a-9bdb-7f2c54aed11b",
            "-c",
        ]);
        assert_eq!(cli.args.web_url, "https://contoso.sharepoint.com");
        assert!(cli.args.update_child_content_types);
        assert!(cli.args.options().is_ok());
    }

    #[test]
    fn test_field_remove_args_long_flags() {
        let cli = TestCli::parse_from([
            "test",
            "--web-url",
            "https://contoso.sharepoint.com",
            "--content-type-id",
            "0x0100558D85B7216F6A489A499DB361E1AE2F",
            "--field-link-id",
            "5ee2dd25-d941-455a-9bdb-7f2c54aed11b",
        ]);
        assert!(!cli.args.update_child_content_types);
    }

    #[test]
    fn test_field_remove_requires_all_ids() {
        let result = TestCli::try_parse_from(["test", "-u", "https://contoso.sharepoint.com"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_field_link_id_fails_validation() {
        let cli = TestCli::parse_from([
            "test",
            "-u",
            "https://contoso.sharepoint.com",
            "-i",
            "0x0100558D85B7216F6A489A499DB361E1AE2F",
            "-f",
            "xxx",
        ]);
        let err = cli.args.options().unwrap_err();
        assert_eq!(err.to_string(), "xxx is not a valid GUID");
    }
}
