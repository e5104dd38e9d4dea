//! Compute the tag for a set of identity fields

use crate::commands::OutputFormat;
use anyhow::Result;
use loginwidget_auth::IdentityClaim;

/// Run the sum command
pub fn run(claim: &IdentityClaim, token: &str, canonical: bool, format: OutputFormat) -> Result<()> {
    let hash = claim.sum(token);

    match format {
        OutputFormat::Json => {
            let mut output = serde_json::json!({ "hash": hash });
            if canonical {
                output["data_check_string"] = claim.canonical_string().into();
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            if canonical {
                println!("{}", claim.canonical_string());
                println!();
            }
            println!("{hash}");
        }
    }

    Ok(())
}
