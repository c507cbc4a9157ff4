use crate::error::RegistrationError;
use async_trait::async_trait;
use std::time::Duration;

/// Checks a phone number before the session is marked registered.
/// A real registration service would plug in here.
#[async_trait]
pub trait PhoneVerifier: Send + Sync {
    async fn verify(&self, phone: &str) -> Result<(), RegistrationError>;
}

/// Accepts every number after a fixed pause, mimicking a round trip.
#[derive(Debug, Clone)]
pub struct SimulatedVerifier {
    delay: Duration,
}

impl SimulatedVerifier {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl PhoneVerifier for SimulatedVerifier {
    async fn verify(&self, phone: &str) -> Result<(), RegistrationError> {
        log::debug!("verifying {phone} (simulated, {:?})", self.delay);
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}
