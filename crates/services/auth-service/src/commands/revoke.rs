//! Revoke command - operator revocation of a refresh token.

use super::RevokeArgs;
use crate::build_refresh_tokens;
use crate::config::AuthServiceConfig;
use crate::infra::Database;
use common::AppResult;

/// Execute the revoke command
pub async fn execute(args: RevokeArgs, config: AuthServiceConfig) -> AppResult<()> {
    let db = Database::connect(&config.database).await?;

    build_refresh_tokens(db.get_connection())
        .revoke(&args.token)
        .await?;

    tracing::info!("Refresh token revoked");
    Ok(())
}
