//! NFT contract bindings.

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol;
use alloy::sol_types::SolCall;
use async_trait::async_trait;

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::mint::capabilities::ChainReader;

sol! {
    /// Subset of the NFT contract ABI used for minting.
    interface INft {
        function getFee() external view returns (uint256);
        function mint(uint256 quantity) external payable;
    }
}

/// Calldata for `mint(quantity)`.
pub fn encode_mint(quantity: u32) -> Bytes {
    INft::mintCall {
        quantity: U256::from(quantity),
    }
    .abi_encode()
    .into()
}

/// Calldata for `getFee()`.
pub fn encode_get_fee() -> Bytes {
    INft::getFeeCall {}.abi_encode().into()
}

/// Decode the return data of `getFee()`.
pub fn decode_get_fee(output: &[u8]) -> BlockchainResult<U256> {
    INft::getFeeCall::abi_decode_returns(output)
        .map_err(|e| BlockchainError::Abi(format!("getFee: {}", e)))
}

/// Read access to the deployed NFT contract.
#[derive(Debug, Clone)]
pub struct NftContract {
    client: BlockchainClient,
    address: Address,
}

impl NftContract {
    pub fn new(client: BlockchainClient) -> Self {
        let address = client.config().contract_address;
        Self { client, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl ChainReader for NftContract {
    async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        self.client.get_balance(address).await
    }

    async fn get_mint_fee(&self) -> BlockchainResult<U256> {
        let output = self.client.call(self.address, encode_get_fee()).await?;
        let fee = decode_get_fee(&output)?;
        tracing::debug!(contract = %self.address, fee = %fee, "Read mint fee");
        Ok(fee)
    }
}
