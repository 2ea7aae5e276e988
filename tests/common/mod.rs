//! Programmable wallet and chain fakes for workflow tests.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use tokio::sync::{mpsc, Notify};

use nft_minter::blockchain::types::{
    BlockchainError, BlockchainResult, ChainId, ConfirmationStatus,
};
use nft_minter::config::{ChainConfig, MinterConfig};
use nft_minter::mint::{
    Account, ChainReader, ConfirmationSubscription, MintCall, WalletConnector,
};

pub const MAINNET: ChainId = ChainId(1);

pub fn eth(amount: &str) -> U256 {
    parse_ether(amount).unwrap()
}

pub fn user() -> Address {
    Address::repeat_byte(0x42)
}

pub fn chain_config() -> Arc<ChainConfig> {
    let mut config = MinterConfig::default();
    config.contract.address = "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string();
    Arc::new(ChainConfig::from_config(&config).unwrap())
}

/// Wallet whose confirmations are pushed by the test through `confirmations`.
pub struct FakeWallet {
    pub chain_id: ChainId,
    pub switch_fails: bool,
    pub write_error: Option<BlockchainError>,
    pub writes: Mutex<Vec<MintCall>>,
    pub switch_requests: AtomicU32,
    pub watch_requests: AtomicU32,
    confirmations: Mutex<Option<mpsc::Receiver<ConfirmationStatus>>>,
    /// When set, `write_mint` records the call and then waits here, like a
    /// wallet prompt the user has not answered yet.
    approval: Option<Arc<Notify>>,
}

impl FakeWallet {
    /// Returns the wallet and the sender that drives its confirmation stream.
    pub fn on_chain(chain_id: ChainId) -> (Arc<Self>, mpsc::Sender<ConfirmationStatus>) {
        let (tx, rx) = mpsc::channel(16);
        let wallet = Arc::new(Self {
            chain_id,
            switch_fails: false,
            write_error: None,
            writes: Mutex::new(Vec::new()),
            switch_requests: AtomicU32::new(0),
            watch_requests: AtomicU32::new(0),
            confirmations: Mutex::new(Some(rx)),
            approval: None,
        });
        (wallet, tx)
    }

    /// Returns the wallet and the handle that approves its pending write.
    pub fn awaiting_approval(chain_id: ChainId) -> (Arc<Self>, Arc<Notify>) {
        let approval = Arc::new(Notify::new());
        let wallet = Arc::new(Self {
            chain_id,
            switch_fails: false,
            write_error: None,
            writes: Mutex::new(Vec::new()),
            switch_requests: AtomicU32::new(0),
            watch_requests: AtomicU32::new(0),
            confirmations: Mutex::new(None),
            approval: Some(approval.clone()),
        });
        (wallet, approval)
    }

    pub fn with(
        chain_id: ChainId,
        switch_fails: bool,
        write_error: Option<BlockchainError>,
    ) -> Arc<Self> {
        Arc::new(Self {
            chain_id,
            switch_fails,
            write_error,
            writes: Mutex::new(Vec::new()),
            switch_requests: AtomicU32::new(0),
            watch_requests: AtomicU32::new(0),
            confirmations: Mutex::new(None),
            approval: None,
        })
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

#[async_trait]
impl WalletConnector for FakeWallet {
    async fn account(&self) -> BlockchainResult<Account> {
        Ok(Account {
            address: Some(user()),
            chain_id: self.chain_id,
        })
    }

    async fn switch_chain(&self, _chain_id: ChainId) -> BlockchainResult<()> {
        self.switch_requests.fetch_add(1, Ordering::SeqCst);
        if self.switch_fails {
            Err(BlockchainError::Rejected("User rejected the request.".into()))
        } else {
            Ok(())
        }
    }

    async fn write_mint(&self, call: MintCall) -> BlockchainResult<TxHash> {
        if let Some(e) = &self.write_error {
            return Err(e.clone());
        }
        self.writes.lock().unwrap().push(call);
        if let Some(approval) = &self.approval {
            approval.notified().await;
        }
        Ok(TxHash::repeat_byte(0xaa))
    }

    fn watch_confirmations(
        &self,
        _tx_hash: TxHash,
        _confirmations: u64,
    ) -> ConfirmationSubscription {
        self.watch_requests.fetch_add(1, Ordering::SeqCst);
        match self.confirmations.lock().unwrap().take() {
            Some(rx) => ConfirmationSubscription::from_receiver(rx),
            None => ConfirmationSubscription::from_statuses(Vec::new()),
        }
    }
}

/// Chain reads with fixed answers.
pub struct FakeReader {
    pub balance: BlockchainResult<U256>,
    pub fee: BlockchainResult<U256>,
    pub reads: AtomicU32,
}

impl FakeReader {
    pub fn new(balance: U256, fee: U256) -> Arc<Self> {
        Arc::new(Self {
            balance: Ok(balance),
            fee: Ok(fee),
            reads: AtomicU32::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            balance: Err(BlockchainError::Rpc("connection refused".into())),
            fee: Err(BlockchainError::Rpc("connection refused".into())),
            reads: AtomicU32::new(0),
        })
    }
}

#[async_trait]
impl ChainReader for FakeReader {
    async fn get_balance(&self, _address: Address) -> BlockchainResult<U256> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.balance.clone()
    }

    async fn get_mint_fee(&self) -> BlockchainResult<U256> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.fee.clone()
    }
}
