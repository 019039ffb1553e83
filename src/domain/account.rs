//! Node and indexer payloads.
//!
//! Shapes follow the algod `/v2/accounts/{address}` and `/v2/status`
//! responses and the indexer `/v2/accounts/{address}/transactions` search.
//! Only the fields the tracker reads are modelled; everything else is
//! ignored by serde.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::MicroAlgos;

/// Consensus participation status reported by the node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AccountStatus {
    /// Registered online with participation keys.
    Online,
    /// Not voting.
    #[default]
    Offline,
    /// Opted out of participation and rewards.
    NotParticipating,
}

impl AccountStatus {
    /// Returns the status as the node spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "Online",
            Self::Offline => "Offline",
            Self::NotParticipating => "NotParticipating",
        }
    }
}

/// Participation key registration attached to an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Participation {
    /// First round the voting key is valid for.
    #[serde(default)]
    pub vote_first_valid: Option<u64>,
    /// Last round the voting key is valid for.
    #[serde(default)]
    pub vote_last_valid: Option<u64>,
    /// Key dilution for the two-level ephemeral signature scheme.
    #[serde(default)]
    pub vote_key_dilution: Option<u64>,
    /// Base64 selection key.
    #[serde(default)]
    pub selection_participation_key: Option<String>,
    /// Base64 root voting key.
    #[serde(default)]
    pub vote_participation_key: Option<String>,
}

impl Participation {
    /// Returns `true` when no participation field is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vote_first_valid.is_none()
            && self.vote_last_valid.is_none()
            && self.vote_key_dilution.is_none()
            && self.selection_participation_key.is_none()
            && self.vote_participation_key.is_none()
    }

    /// Returns the `(first, last)` validity window if both ends are set and
    /// non-zero.
    #[must_use]
    pub fn window(&self) -> Option<(u64, u64)> {
        match (self.vote_first_valid, self.vote_last_valid) {
            (Some(first), Some(last)) if first != 0 && last != 0 => Some((first, last)),
            _ => None,
        }
    }
}

/// Account snapshot returned by `GET /v2/accounts/{address}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AccountInfo {
    /// Account address.
    #[serde(default)]
    pub address: String,
    /// Total balance including pending rewards.
    #[serde(default)]
    pub amount: MicroAlgos,
    /// Rewards accrued so far.
    #[serde(default)]
    pub rewards: MicroAlgos,
    /// Rewards not yet folded into the balance.
    #[serde(default)]
    pub pending_rewards: MicroAlgos,
    /// Reward base used by the legacy rewards scheme.
    #[serde(default, alias = "rewards-base")]
    pub reward_base: u64,
    /// Minimum balance the account must keep.
    #[serde(default)]
    pub min_balance: MicroAlgos,
    /// Participation status.
    #[serde(default)]
    pub status: AccountStatus,
    /// Participation key registration, if any.
    #[serde(default)]
    pub participation: Option<Participation>,
}

impl AccountInfo {
    /// Returns `true` when the account is registered online.
    #[must_use]
    pub fn is_online(&self) -> bool {
        self.status == AccountStatus::Online
    }

    /// Returns `true` when a non-empty participation record is present.
    #[must_use]
    pub fn has_participation_keys(&self) -> bool {
        self.participation.as_ref().is_some_and(|p| !p.is_empty())
    }
}

/// Node status returned by `GET /v2/status`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NodeStatus {
    /// Last committed round.
    #[serde(default)]
    pub last_round: u64,
    /// Nanoseconds since the last round was seen.
    #[serde(default)]
    pub time_since_last_round: Option<u64>,
    /// Consensus version the node currently follows.
    #[serde(default)]
    pub last_version: Option<String>,
}

/// Payment body of an indexer transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PaymentTransaction {
    /// Amount paid.
    #[serde(default)]
    pub amount: MicroAlgos,
    /// Receiving address.
    #[serde(default)]
    pub receiver: Option<String>,
}

/// A transaction as returned by the indexer search endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IndexerTransaction {
    /// Transaction id.
    #[serde(default)]
    pub id: Option<String>,
    /// Round the transaction was confirmed in.
    #[serde(default)]
    pub confirmed_round: u64,
    /// Block timestamp in unix seconds.
    #[serde(default)]
    pub round_time: i64,
    /// Payment body; absent for non-payment transactions.
    #[serde(default)]
    pub payment_transaction: Option<PaymentTransaction>,
}

/// One page of indexer search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TransactionsPage {
    /// Round the indexer answered at.
    #[serde(default)]
    pub current_round: u64,
    /// Cursor for the next page.
    #[serde(default)]
    pub next_token: Option<String>,
    /// Transactions on this page.
    #[serde(default)]
    pub transactions: Vec<IndexerTransaction>,
}

/// A proposer payout extracted from an indexer transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RewardTransaction {
    /// Transaction id. Never empty.
    pub tx_id: String,
    /// Confirmation round.
    pub round: u64,
    /// Block time.
    pub timestamp: DateTime<Utc>,
    /// Amount paid in µALGO.
    #[schema(value_type = u64)]
    pub amount: MicroAlgos,
}

impl RewardTransaction {
    /// Converts an indexer transaction into a payout. Returns `None` for
    /// transactions without a payment body or without an id, since the id
    /// is the storage key.
    #[must_use]
    pub fn from_indexer(tx: &IndexerTransaction) -> Option<Self> {
        let payment = tx.payment_transaction.as_ref()?;
        let tx_id = tx.id.as_deref().filter(|id| !id.is_empty())?;
        Some(Self {
            tx_id: tx_id.to_string(),
            round: tx.confirmed_round,
            timestamp: DateTime::from_timestamp(tx.round_time, 0).unwrap_or_default(),
            amount: payment.amount,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    const ACCOUNT_JSON: &str = r#"{
        "address": "KK4KTUPTKX3YNA5G2HMYO4CD63F6MTKXDJLIOJ5RRT7TRQK6HC25NUGZTY",
        "amount": 145726370000,
        "amount-without-pending-rewards": 145726370000,
        "min-balance": 100000,
        "pending-rewards": 0,
        "reward-base": 218288,
        "rewards": 0,
        "round": 47000000,
        "status": "Online",
        "participation": {
            "selection-participation-key": "c2VsZWN0aW9u",
            "vote-first-valid": 46000000,
            "vote-key-dilution": 1733,
            "vote-last-valid": 49000000,
            "vote-participation-key": "dm90ZQ=="
        }
    }"#;

    #[test]
    fn decodes_node_account() {
        let Ok(account) = serde_json::from_str::<AccountInfo>(ACCOUNT_JSON) else {
            panic!("account payload rejected");
        };
        assert!(account.is_online());
        assert!(account.has_participation_keys());
        assert_eq!(account.amount.get(), 145_726_370_000);
        assert_eq!(account.reward_base, 218_288);
        assert_eq!(
            account.participation.and_then(|p| p.window()),
            Some((46_000_000, 49_000_000))
        );
    }

    #[test]
    fn legacy_rewards_base_spelling_is_accepted() {
        let Ok(account) = serde_json::from_str::<AccountInfo>(r#"{"rewards-base": 7}"#) else {
            panic!("payload rejected");
        };
        assert_eq!(account.reward_base, 7);
        assert_eq!(account.status, AccountStatus::Offline);
        assert!(!account.has_participation_keys());
    }

    #[test]
    fn empty_participation_object_means_no_keys() {
        let Ok(account) =
            serde_json::from_str::<AccountInfo>(r#"{"status": "Online", "participation": {}}"#)
        else {
            panic!("payload rejected");
        };
        assert!(!account.has_participation_keys());
    }

    #[test]
    fn zero_window_bound_is_treated_as_missing() {
        let participation = Participation {
            vote_first_valid: Some(0),
            vote_last_valid: Some(200),
            ..Participation::default()
        };
        assert_eq!(participation.window(), None);
    }

    #[test]
    fn payout_requires_payment_body() {
        let tx = IndexerTransaction {
            id: Some("TX1".to_string()),
            confirmed_round: 10,
            round_time: 1_739_577_600,
            payment_transaction: None,
        };
        assert!(RewardTransaction::from_indexer(&tx).is_none());

        let tx = IndexerTransaction {
            payment_transaction: Some(PaymentTransaction {
                amount: MicroAlgos::new(10_000_000),
                receiver: None,
            }),
            ..tx
        };
        let Some(payout) = RewardTransaction::from_indexer(&tx) else {
            panic!("payment dropped");
        };
        assert_eq!(payout.tx_id, "TX1");
        assert_eq!(payout.round, 10);
        assert_eq!(payout.timestamp.to_rfc3339(), "2025-02-15T00:00:00+00:00");
    }

    #[test]
    fn payout_requires_transaction_id() {
        let payment = Some(PaymentTransaction {
            amount: MicroAlgos::new(1_000_000),
            receiver: None,
        });
        let missing = IndexerTransaction {
            id: None,
            confirmed_round: 10,
            round_time: 1_739_577_600,
            payment_transaction: payment.clone(),
        };
        let empty = IndexerTransaction {
            id: Some(String::new()),
            confirmed_round: 11,
            round_time: 1_739_577_700,
            payment_transaction: payment,
        };
        assert!(RewardTransaction::from_indexer(&missing).is_none());
        assert!(RewardTransaction::from_indexer(&empty).is_none());
    }
}
