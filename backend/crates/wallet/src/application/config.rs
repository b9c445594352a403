//! Application Configuration
//!
//! Reward policy for the wallet application layer.

use kernel::money::Money;

#[derive(Debug, Clone)]
pub struct WalletConfig {
    /// Credit per watched ad (0.50)
    pub ad_reward: Money,
    /// Credit to the referrer per referred signup (5.00)
    pub referral_bonus: Money,
    /// Smallest withdrawal accepted (10.00)
    pub minimum_withdrawal: Money,
    /// Cap on every list endpoint
    pub list_limit: i64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            ad_reward: Money::from_minor(50),
            referral_bonus: Money::from_minor(500),
            minimum_withdrawal: Money::from_minor(1000),
            list_limit: 100,
        }
    }
}
