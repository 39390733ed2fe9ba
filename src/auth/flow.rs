use crate::{
    auth::credentials::Credentials,
    traits::Notifier,
    ui::notice::Notice,
    Result,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Identity provider requests. Session changes come back as `AuthEvent`s.
#[async_trait]
pub trait AuthClient: Send + Sync {
    async fn sign_up(&self, credentials: &Credentials) -> Result<()>;

    async fn sign_in(&self, credentials: &Credentials) -> Result<()>;

    async fn sign_out(&self) -> Result<()>;
}

/// Sign-up, login and logout with the user-facing notices around them.
///
/// Missing input is reported before any request goes out.
pub struct AuthFlow {
    client: Arc<dyn AuthClient>,
    notifier: Arc<dyn Notifier>,
}

impl AuthFlow {
    pub fn new(client: Arc<dyn AuthClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    fn credentials(&self, email: &str, password: &str) -> Result<Credentials> {
        Credentials::new(email, password).map_err(|e| {
            self.notifier.notify(Notice::blocking(e.to_string()));
            e
        })
    }

    fn report(&self, outcome: Result<()>, label: &str, success: &str) -> Result<()> {
        match outcome {
            Ok(()) => {
                self.notifier.notify(Notice::blocking(success));
                Ok(())
            }
            Err(e) => {
                log::warn!("{} failed: {}", label, e);
                self.notifier.notify(Notice::blocking(format!("{} error: {}", label, e)));
                Err(e)
            }
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<()> {
        let credentials = self.credentials(email, password)?;
        let outcome = self.client.sign_up(&credentials).await;
        self.report(
            outcome,
            "Sign up",
            "Sign up successful! Please check your email for confirmation.",
        )
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<()> {
        let credentials = self.credentials(email, password)?;
        let outcome = self.client.sign_in(&credentials).await;
        self.report(outcome, "Login", "Login successful!")
    }

    pub async fn sign_out(&self) -> Result<()> {
        let outcome = self.client.sign_out().await;
        self.report(outcome, "Logout", "Logged out successfully")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ui::notice::NoticeBoard, MapError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeAuth {
        calls: AtomicUsize,
        reject: bool,
    }

    #[async_trait]
    impl AuthClient for FakeAuth {
        async fn sign_up(&self, _credentials: &Credentials) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn sign_in(&self, _credentials: &Credentials) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.reject {
                Err(MapError::Auth("Invalid login credentials".into()))
            } else {
                Ok(())
            }
        }

        async fn sign_out(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn flow(reject: bool) -> (AuthFlow, Arc<FakeAuth>, Arc<NoticeBoard>) {
        let client = Arc::new(FakeAuth { reject, ..FakeAuth::default() });
        let board = Arc::new(NoticeBoard::new());
        (AuthFlow::new(client.clone(), board.clone()), client, board)
    }

    #[tokio::test]
    async fn test_missing_input_never_reaches_client() {
        let (flow, client, board) = flow(false);
        let result = flow.sign_in("", "pw").await;

        assert!(matches!(result, Err(MapError::MissingInput(_))));
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            board.latest().map(|n| n.message),
            Some("Please enter both email and password.".to_string())
        );
    }

    #[tokio::test]
    async fn test_success_and_failure_notices() {
        let (flow, _, board) = flow(false);
        flow.sign_up("a@b.co", "pw").await.expect("sign up");
        assert_eq!(
            board.latest().map(|n| n.message),
            Some("Sign up successful! Please check your email for confirmation.".to_string())
        );
        flow.sign_out().await.expect("sign out");
        assert_eq!(board.latest().map(|n| n.message), Some("Logged out successfully".to_string()));

        let (failing, _, board) = self::flow(true);
        assert!(failing.sign_in("a@b.co", "pw").await.is_err());
        assert_eq!(
            board.latest().map(|n| n.message),
            Some("Login error: Invalid login credentials".to_string())
        );
    }
}
