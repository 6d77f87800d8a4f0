//! Withdrawal routing against a vault double that reproduces the
//! contract's slippage check.

use async_trait::async_trait;
use covus_app::staking::{RouterConfig, StakingService};
use covus_app::queue::QueueService;
use covus_protocols::error::VaultError;
use covus_protocols::{VaultReader, VaultWriter};
use ethers::types::{Address, TxHash, U256};
use std::sync::{Arc, Mutex};

fn wei(n: u64) -> U256 {
    U256::from(n) * U256::exp10(18)
}

fn milli(n: u64) -> U256 {
    U256::from(n) * U256::exp10(15)
}

/// Test double for the vault contract.
///
/// Reads serve fixed scalars; `redeem_stt` re-runs the slippage check the
/// way the contract does, with an optional haircut standing in for state
/// moving between the client's reads and the submission landing.
struct MockVault {
    total_assets: U256,
    total_supply: U256,
    queued_assets: U256,
    free_liquidity: U256,
    paused: bool,
    pending: U256,
    /// Haircut (bps) applied to the payout at execution time only.
    execution_haircut_bps: u64,
    /// Haircut (bps) already visible through `convertToAssets`.
    quoted_haircut_bps: u64,
    calls: Mutex<Vec<String>>,
}

impl MockVault {
    fn healthy(total_assets: u64, total_supply: u64, free_liquidity: u64) -> Self {
        Self {
            total_assets: wei(total_assets),
            total_supply: wei(total_supply),
            queued_assets: U256::zero(),
            free_liquidity: wei(free_liquidity),
            paused: false,
            pending: U256::zero(),
            execution_haircut_bps: 0,
            quoted_haircut_bps: 0,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn quote(&self, shares: U256) -> U256 {
        let backing = self.total_assets + self.queued_assets;
        let exact = if self.total_supply.is_zero() {
            shares
        } else {
            shares * backing / self.total_supply
        };
        exact * U256::from(10_000 - self.quoted_haircut_bps) / U256::from(10_000)
    }
}

#[async_trait]
impl VaultReader for MockVault {
    async fn total_assets(&self) -> Result<U256, VaultError> {
        Ok(self.total_assets)
    }
    async fn total_supply(&self) -> Result<U256, VaultError> {
        Ok(self.total_supply)
    }
    async fn queued_assets(&self) -> Result<U256, VaultError> {
        Ok(self.queued_assets)
    }
    async fn free_liquidity(&self) -> Result<U256, VaultError> {
        Ok(self.free_liquidity)
    }
    async fn balance_of(&self, _owner: Address) -> Result<U256, VaultError> {
        Ok(self.total_supply)
    }
    async fn convert_to_assets(&self, shares: U256) -> Result<U256, VaultError> {
        Ok(self.quote(shares))
    }
    async fn pending_requests(&self) -> Result<U256, VaultError> {
        Ok(self.pending)
    }
    async fn head(&self) -> Result<U256, VaultError> {
        Ok(U256::zero())
    }
    async fn tail(&self) -> Result<U256, VaultError> {
        Ok(self.pending)
    }
    async fn cs_stt_rate(&self) -> Result<U256, VaultError> {
        Ok(U256::exp10(18))
    }
    async fn is_exchange_rate_healthy(&self) -> Result<bool, VaultError> {
        Ok(true)
    }
    async fn paused(&self) -> Result<bool, VaultError> {
        Ok(self.paused)
    }
    async fn max_slippage_bps(&self) -> Result<U256, VaultError> {
        Ok(U256::from(500))
    }
}

#[async_trait]
impl VaultWriter for MockVault {
    async fn deposit_stt(&self, _receiver: Address, value: U256) -> Result<TxHash, VaultError> {
        if value.is_zero() {
            return Err(VaultError::ZeroAmount);
        }
        self.record("depositSTT");
        Ok(TxHash::zero())
    }

    async fn redeem(
        &self,
        _shares: U256,
        _receiver: Address,
        _owner: Address,
    ) -> Result<TxHash, VaultError> {
        self.record("redeem");
        Ok(TxHash::zero())
    }

    async fn redeem_stt(
        &self,
        shares: U256,
        min_assets: U256,
        _receiver: Address,
        _owner: Address,
    ) -> Result<TxHash, VaultError> {
        self.record(format!("redeemSTT shares={shares} min={min_assets}"));
        // The contract's own check: realized payout must meet the bound,
        // boundary inclusive.
        let payout =
            self.quote(shares) * U256::from(10_000 - self.execution_haircut_bps) / U256::from(10_000);
        if payout < min_assets {
            return Err(VaultError::SlippageExceeded);
        }
        Ok(TxHash::zero())
    }

    async fn withdraw(
        &self,
        _assets: U256,
        _receiver: Address,
        _owner: Address,
    ) -> Result<TxHash, VaultError> {
        self.record("withdraw");
        Ok(TxHash::zero())
    }

    async fn withdraw_stt(
        &self,
        _assets: U256,
        _max_shares: U256,
        _receiver: Address,
        _owner: Address,
    ) -> Result<TxHash, VaultError> {
        self.record("withdrawSTT");
        Ok(TxHash::zero())
    }

    async fn request_withdrawal(
        &self,
        shares: U256,
        as_native: bool,
    ) -> Result<TxHash, VaultError> {
        self.record(format!("requestWithdrawal shares={shares} native={as_native}"));
        Ok(TxHash::zero())
    }

    async fn process_queue(&self, max_count: U256) -> Result<TxHash, VaultError> {
        self.record(format!("processQueue count={max_count}"));
        Ok(TxHash::zero())
    }

    async fn approve(&self, _spender: Address, _amount: U256) -> Result<TxHash, VaultError> {
        self.record("approve");
        Ok(TxHash::zero())
    }
}

fn service(vault: Arc<MockVault>) -> StakingService {
    StakingService::new(vault.clone(), vault, RouterConfig::default())
}

#[tokio::test]
async fn instant_redemption_accepted_at_exact_slippage_boundary() {
    let vault = Arc::new(MockVault {
        // execution pays exactly the 5% bound
        execution_haircut_bps: 500,
        ..MockVault::healthy(10, 10, 10)
    });
    let staking = service(vault.clone());

    let outcome = staking
        .withdraw(wei(1), Address::zero())
        .await
        .expect("boundary payout must be accepted");

    assert!(outcome.route.is_instant());
    let calls = vault.calls();
    assert_eq!(calls.len(), 1);
    // 1 STT at a 1:1 rate burns 1e18 shares, guarded at 0.95 STT
    assert_eq!(
        calls[0],
        format!("redeemSTT shares={} min={}", wei(1), milli(950))
    );
}

#[tokio::test]
async fn instant_redemption_below_boundary_rejected_by_contract() {
    let vault = Arc::new(MockVault {
        // one basis point under the bound
        execution_haircut_bps: 501,
        ..MockVault::healthy(10, 10, 10)
    });
    let staking = service(vault.clone());

    let err = staking.withdraw(wei(1), Address::zero()).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<VaultError>(),
        Some(&VaultError::SlippageExceeded)
    );
    // the submission was attempted; the contract-side check rejected it
    assert_eq!(vault.calls().len(), 1);
}

#[tokio::test]
async fn client_precheck_refuses_before_submitting() {
    let vault = Arc::new(MockVault {
        // the depressed payout is already visible through convertToAssets
        quoted_haircut_bps: 600,
        ..MockVault::healthy(10, 10, 10)
    });
    let staking = service(vault.clone());

    let err = staking.withdraw(wei(1), Address::zero()).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<VaultError>(),
        Some(&VaultError::SlippageExceeded)
    );
    // refused client-side: nothing was submitted
    assert!(vault.calls().is_empty());
}

#[tokio::test]
async fn insufficient_liquidity_routes_to_queue() {
    let vault = Arc::new(MockVault::healthy(10, 10, 0));
    let staking = service(vault.clone());

    let outcome = staking.withdraw(wei(2), Address::zero()).await.unwrap();
    assert!(!outcome.route.is_instant());

    let calls = vault.calls();
    assert_eq!(
        calls,
        vec![format!("requestWithdrawal shares={} native=true", wei(2))]
    );
}

#[tokio::test]
async fn exact_free_liquidity_is_still_instant() {
    let vault = Arc::new(MockVault::healthy(10, 10, 2));
    let staking = service(vault.clone());

    let outcome = staking.withdraw(wei(2), Address::zero()).await.unwrap();
    assert!(outcome.route.is_instant());
}

#[tokio::test]
async fn paused_vault_refuses_both_operations() {
    let vault = Arc::new(MockVault {
        paused: true,
        ..MockVault::healthy(10, 10, 10)
    });
    let staking = service(vault.clone());

    let err = staking.deposit(wei(1), Address::zero()).await.unwrap_err();
    assert_eq!(err.downcast_ref::<VaultError>(), Some(&VaultError::Paused));

    let err = staking.withdraw(wei(1), Address::zero()).await.unwrap_err();
    assert_eq!(err.downcast_ref::<VaultError>(), Some(&VaultError::Paused));

    assert!(vault.calls().is_empty());
}

#[tokio::test]
async fn zero_amounts_are_refused_client_side() {
    let vault = Arc::new(MockVault::healthy(10, 10, 10));
    let staking = service(vault.clone());

    let err = staking.deposit(U256::zero(), Address::zero()).await.unwrap_err();
    assert_eq!(
        err.downcast_ref::<VaultError>(),
        Some(&VaultError::ZeroAmount)
    );
    assert!(vault.calls().is_empty());
}

#[tokio::test]
async fn process_queue_passes_pending_count() {
    let vault = Arc::new(MockVault {
        pending: U256::from(7),
        ..MockVault::healthy(10, 10, 0)
    });
    let queue = QueueService::new(vault.clone(), vault.clone());

    let hash = queue.process().await.unwrap();
    assert!(hash.is_some());
    assert_eq!(vault.calls(), vec!["processQueue count=7".to_string()]);
}

#[tokio::test]
async fn empty_queue_is_a_no_op() {
    let vault = Arc::new(MockVault::healthy(10, 10, 10));
    let queue = QueueService::new(vault.clone(), vault.clone());

    let hash = queue.process().await.unwrap();
    assert!(hash.is_none());
    assert!(vault.calls().is_empty());
}
