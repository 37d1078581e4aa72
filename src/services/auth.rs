// src/services/auth.rs

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    common::{clock::Clock, error::AppError},
    db::{ResellerRepository, SessionRepository, UserRepository},
    models::auth::{AuthResponse, Claims, Principal, PrincipalKind, Session},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    reseller_repo: ResellerRepository,
    session_repo: SessionRepository,
    jwt_secret: String,
    session_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        reseller_repo: ResellerRepository,
        session_repo: SessionRepository,
        jwt_secret: String,
        session_ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repo,
            reseller_repo,
            session_repo,
            jwt_secret,
            session_ttl,
            clock,
        }
    }

    /// Administradores primeiro, depois revendas. Senhas em texto puro.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Principal, AppError> {
        let now = self.clock.now();

        if let Some(user) = self.user_repo.find_by_email(email).await? {
            if user.password == password && user.active {
                self.user_repo.touch_last_access(&user.id, now).await?;
                return Ok(Principal::from(&user));
            }
        }

        if let Some(reseller) = self.reseller_repo.find_by_email(email).await? {
            // Revenda bloqueada não entra, mesmo com a senha certa
            if reseller.password == password && reseller.can_authenticate() {
                self.reseller_repo.touch_last_access(&reseller.id, now).await?;
                return Ok(Principal {
                    id: reseller.id,
                    name: reseller.name,
                    email: reseller.email,
                    kind: PrincipalKind::Reseller,
                });
            }
        }

        Err(AppError::InvalidCredentials)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AppError> {
        let principal = self.authenticate(email, password).await?;
        let token = self.open_session(&principal).await?;
        tracing::info!("🔑 Login de {} ({:?})", principal.email, principal.kind);
        Ok(AuthResponse { token, principal })
    }

    /// Decodifica o token, confere a sessão persistida e resolve o principal de novo.
    ///
    /// Sessão de principal que sumiu, foi desativado ou bloqueado é apagada.
    pub async fn validate_token(&self, token: &str) -> Result<(Principal, String), AppError> {
        // A expiração é conferida contra o relógio injetado, não o do sistema
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|_| AppError::InvalidToken)?;
        let claims = token_data.claims;

        if claims.exp < self.clock.now().timestamp() {
            return Err(AppError::InvalidToken);
        }

        let session = self
            .session_repo
            .find_by_id(&claims.sid)
            .await?
            .filter(|s| s.principal_id == claims.sub)
            .ok_or(AppError::InvalidToken)?;

        match self.resolve_principal(&session.principal_id).await? {
            Some(principal) => Ok((principal, session.id)),
            None => {
                self.session_repo.delete(&session.id).await?;
                Err(AppError::InvalidToken)
            }
        }
    }

    pub async fn logout(&self, session_id: &str) -> Result<(), AppError> {
        self.session_repo.delete(session_id).await?;
        Ok(())
    }

    /// Troca o próprio e-mail/senha. Todas as sessões antigas caem e uma nova é aberta.
    pub async fn change_credentials(
        &self,
        principal: &Principal,
        new_email: &str,
        new_password: &str,
    ) -> Result<AuthResponse, AppError> {
        self.ensure_email_free(new_email, &principal.id).await?;

        let updated = match self.user_repo.find_by_id(&principal.id).await? {
            Some(mut user) => {
                user.email = new_email.to_string();
                user.password = new_password.to_string();
                Principal::from(&self.user_repo.save(&user).await?)
            }
            None => {
                let mut reseller = self
                    .reseller_repo
                    .find_by_id(&principal.id)
                    .await?
                    .ok_or(AppError::ResellerNotFound)?;
                reseller.email = new_email.to_string();
                reseller.password = new_password.to_string();
                let saved = self.reseller_repo.save(&reseller).await?;
                Principal {
                    id: saved.id,
                    name: saved.name,
                    email: saved.email,
                    kind: PrincipalKind::Reseller,
                }
            }
        };

        let dropped = self.session_repo.delete_by_principal(&updated.id).await?;
        tracing::info!("🔐 Credenciais de {} alteradas ({} sessões encerradas)", updated.id, dropped);

        let token = self.open_session(&updated).await?;
        Ok(AuthResponse {
            token,
            principal: updated,
        })
    }

    /// E-mail único entre administradores e revendas (ignorando o próprio dono).
    pub async fn ensure_email_free(&self, email: &str, owner_id: &str) -> Result<(), AppError> {
        let taken_by_user = self
            .user_repo
            .find_by_email(email)
            .await?
            .is_some_and(|u| u.id != owner_id);
        let taken_by_reseller = self
            .reseller_repo
            .find_by_email(email)
            .await?
            .is_some_and(|r| r.id != owner_id);

        if taken_by_user || taken_by_reseller {
            return Err(AppError::EmailAlreadyExists);
        }
        Ok(())
    }

    async fn resolve_principal(&self, id: &str) -> Result<Option<Principal>, AppError> {
        if let Some(user) = self.user_repo.find_by_id(id).await? {
            return Ok(user.active.then(|| Principal::from(&user)));
        }

        let principal = self
            .reseller_repo
            .find_by_id(id)
            .await?
            .filter(|r| r.can_authenticate())
            .map(|r| Principal {
                id: r.id,
                name: r.name,
                email: r.email,
                kind: PrincipalKind::Reseller,
            });
        Ok(principal)
    }

    async fn open_session(&self, principal: &Principal) -> Result<String, AppError> {
        let now = self.clock.now();
        let session = Session {
            id: Uuid::new_v4().to_string(),
            principal_id: principal.id.clone(),
            email: principal.email.clone(),
            created_at: now,
        };
        self.session_repo.create(&session).await?;
        self.create_token(&principal.id, &session.id)
    }

    fn create_token(&self, principal_id: &str, session_id: &str) -> Result<String, AppError> {
        let now = self.clock.now();
        let expires_at = now + self.session_ttl;

        let claims = Claims {
            sub: principal_id.to_string(),
            sid: session_id.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::clock::FixedClock,
        db::RecordStore,
        models::{banner::LogoPosition, rbac::Permissions, reseller::{Reseller, ResellerTier}},
    };
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    struct Fixture {
        service: AuthService,
        resellers: ResellerRepository,
        clock: Arc<FixedClock>,
    }

    async fn fixture() -> Fixture {
        let store = RecordStore::in_memory();
        let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()));
        let users = UserRepository::new(store.clone());
        users.seed_default_admin(clock.now()).await.unwrap();
        let resellers = ResellerRepository::new(store.clone());

        let reseller = Reseller {
            id: "r1".into(),
            name: "Revenda Centro".into(),
            email: "centro@revenda.com".into(),
            password: "123456".into(),
            active: true,
            blocked: false,
            tier: ResellerTier::Simple,
            monthly_fee: Decimal::new(5000, 2),
            expiration_date: Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap(),
            created_at: clock.now(),
            last_access: None,
            notes: String::new(),
            custom_logo_url: None,
            logo_position: LogoPosition::Right,
            alert_lead_days: None,
            permissions: Permissions::simple_defaults(),
        };
        resellers.create(&reseller).await.unwrap();

        let service = AuthService::new(
            users,
            resellers.clone(),
            SessionRepository::new(store),
            "segredo-de-teste".into(),
            Duration::days(7),
            clock.clone(),
        );
        Fixture { service, resellers, clock }
    }

    #[tokio::test]
    async fn admin_logs_in_with_seeded_credentials() {
        let f = fixture().await;
        let auth = f.service.login("admin@iptv.com", "admin123").await.unwrap();
        assert!(auth.principal.is_administrator());

        let (principal, _) = f.service.validate_token(&auth.token).await.unwrap();
        assert_eq!(principal.id, "admin");
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let f = fixture().await;
        assert!(matches!(
            f.service.login("admin@iptv.com", "errada").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn blocked_reseller_cannot_log_in_and_loses_sessions() {
        let f = fixture().await;
        let auth = f.service.login("centro@revenda.com", "123456").await.unwrap();
        assert_eq!(auth.principal.kind, PrincipalKind::Reseller);

        let mut reseller = f.resellers.find_by_id("r1").await.unwrap().unwrap();
        reseller.block();
        f.resellers.save(&reseller).await.unwrap();

        assert!(matches!(
            f.service.validate_token(&auth.token).await,
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(
            f.service.login("centro@revenda.com", "123456").await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn token_expires_with_the_injected_clock() {
        let f = fixture().await;
        let auth = f.service.login("admin@iptv.com", "admin123").await.unwrap();

        f.clock.set(f.clock.now() + Duration::days(8));
        assert!(matches!(
            f.service.validate_token(&auth.token).await,
            Err(AppError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn logout_invalidates_the_token() {
        let f = fixture().await;
        let auth = f.service.login("admin@iptv.com", "admin123").await.unwrap();
        let (_, session_id) = f.service.validate_token(&auth.token).await.unwrap();

        f.service.logout(&session_id).await.unwrap();
        assert!(f.service.validate_token(&auth.token).await.is_err());
    }

    #[tokio::test]
    async fn changing_credentials_reissues_the_session() {
        let f = fixture().await;
        let old = f.service.login("centro@revenda.com", "123456").await.unwrap();

        let renewed = f
            .service
            .change_credentials(&old.principal, "novo@revenda.com", "nova-senha")
            .await
            .unwrap();

        assert!(f.service.validate_token(&old.token).await.is_err());
        assert!(f.service.validate_token(&renewed.token).await.is_ok());
        assert!(f.service.login("novo@revenda.com", "nova-senha").await.is_ok());
    }

    #[tokio::test]
    async fn email_taken_by_another_account_is_refused() {
        let f = fixture().await;
        let old = f.service.login("centro@revenda.com", "123456").await.unwrap();

        assert!(matches!(
            f.service
                .change_credentials(&old.principal, "admin@iptv.com", "qualquer")
                .await,
            Err(AppError::EmailAlreadyExists)
        ));
    }
}
