//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tracing::warn;

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenUuid, ApiTokenVersion, AuthServiceError, IssuedApiToken,
        build_verifier_input, format_api_token, generate_api_token_secret, hash_verifier_input,
        models::NewApiToken, parse_api_token, repository::PgAuthRepository, verify_token_hash,
    },
    domain::users::records::UserUuid,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgAuthRepository::new(pool),
        }
    }

    /// Issue a new API token for the given user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::UnknownUser`] if the user does not exist, or an error if
    /// database insertion fails.
    pub async fn issue_api_token(
        &self,
        user_uuid: UserUuid,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = ApiTokenUuid::new();
        let version = ApiTokenVersion::V1;
        let secret = generate_api_token_secret();
        let token = format_api_token(token_uuid, version, &secret);

        let token_hash =
            hash_verifier_input(&build_verifier_input(token_uuid, version, user_uuid, &secret));

        let metadata = self
            .repository
            .create_api_token(&NewApiToken {
                uuid: token_uuid,
                user_uuid,
                version,
                token_hash,
                expires_at,
            })
            .await?;

        Ok(IssuedApiToken { token, metadata })
    }

    /// List all tokens for the given user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        user_uuid: UserUuid,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        Ok(self.repository.list_api_tokens_by_user(user_uuid).await?)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(
        &self,
        token_uuid: ApiTokenUuid,
    ) -> Result<bool, AuthServiceError> {
        self.repository
            .revoke_api_token(token_uuid)
            .await
            .map(|record| record.is_some())
            .map_err(AuthServiceError::from)
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError> {
        let parsed_token = parse_api_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let token = self
            .repository
            .find_active_api_token_by_uuid(parsed_token.token_uuid, parsed_token.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        let verifier_input = build_verifier_input(
            parsed_token.token_uuid,
            parsed_token.version,
            token.user_uuid,
            &parsed_token.secret,
        );

        if !verify_token_hash(&verifier_input, &token.token_hash) {
            return Err(AuthServiceError::NotFound);
        }

        // Auth success does not depend on this write.
        if let Err(error) = self
            .repository
            .touch_api_token_last_used(parsed_token.token_uuid)
            .await
        {
            warn!(token_uuid = %parsed_token.token_uuid, %error, "failed to record token use");
        }

        Ok(token.user_uuid)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the user it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<UserUuid, AuthServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};
    use sqlx::query;
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn service(ctx: &TestContext) -> PgAuthService {
        PgAuthService::new(ctx.app_db.pool().clone())
    }

    #[tokio::test]
    async fn issued_token_authenticates_as_owner() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = service(&ctx);

        let issued = auth.issue_api_token(ctx.user_uuid, None).await?;

        assert!(issued.token.starts_with("sf_v1_"));
        assert_eq!(issued.metadata.user_uuid, ctx.user_uuid);
        assert!(issued.metadata.last_used_at.is_none());

        let user = auth.authenticate_bearer(&issued.token).await?;

        assert_eq!(user, ctx.user_uuid);

        let listed = auth.list_api_tokens(ctx.user_uuid).await?;
        let token = listed.first().ok_or("expected one token")?;

        assert_eq!(listed.len(), 1);
        assert!(token.last_used_at.is_some(), "use should be recorded");

        Ok(())
    }

    #[tokio::test]
    async fn tampered_secret_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = service(&ctx);

        let issued = auth.issue_api_token(ctx.user_uuid, None).await?;

        let (id, secret) = issued.token.split_once('.').ok_or("malformed token")?;
        let flipped = if secret.starts_with('0') { "1" } else { "0" };
        let tampered = format!("{id}.{flipped}{}", secret.get(1..).ok_or("short secret")?);

        let result = auth.authenticate_bearer(&tampered).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let ctx = TestContext::new().await;

        let result = service(&ctx).authenticate_bearer("not-a-token").await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn revoked_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = service(&ctx);

        let issued = auth.issue_api_token(ctx.user_uuid, None).await?;

        assert!(auth.revoke_api_token(issued.metadata.uuid).await?);
        assert!(
            !auth.revoke_api_token(issued.metadata.uuid).await?,
            "second revoke should report inactive"
        );

        let result = auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn expired_token_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let auth = service(&ctx);

        let issued = auth
            .issue_api_token(
                ctx.user_uuid,
                Some(Timestamp::now() + SignedDuration::from_hours(1)),
            )
            .await?;

        query("UPDATE api_tokens SET expires_at = now() - interval '1 minute' WHERE uuid = $1")
            .bind(issued.metadata.uuid.into_uuid())
            .execute(ctx.db.pool())
            .await?;

        let result = auth.authenticate_bearer(&issued.token).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn issue_for_unknown_user_returns_unknown_user() {
        let ctx = TestContext::new().await;

        let result = service(&ctx).issue_api_token(UserUuid::new(), None).await;

        assert!(
            matches!(result, Err(AuthServiceError::UnknownUser)),
            "expected UnknownUser, got {result:?}"
        );
    }
}
