//! JSON-RPC implementation of the ticket contract ports.

use async_trait::async_trait;
use ethers::middleware::SignerMiddleware;
use ethers::providers::Middleware;
use ethers::signers::Signer;
use ethers::types::TransactionRequest as EthTransactionRequest;
use std::fmt;
use std::sync::Arc;
use tokio::sync::OnceCell;

use super::errors::{from_call, from_middleware};
use super::provider::{RpcConfig, RpcProvider};
use crate::domain::contract::abi::TicketContract;
use crate::domain::contract::{ContractError, LocalSigner, TransactionRequest, TxHash};
use crate::domain::foundation::{WalletAddress, Wei};
use crate::ports::{TicketContractReader, TransactionSender};

/// JSON-RPC "invalid params" error code.
const INVALID_PARAMS: i64 = -32602;

/// Ticket contract reached through the generated bindings.
///
/// Reads are `eth_call`s. Writes go out as `eth_sendTransaction` for the
/// node to sign, or are signed locally and sent with
/// `eth_sendRawTransaction` when the request carries a [`LocalSigner`].
pub struct RpcTicketContract {
    provider: Arc<RpcProvider>,
    contract: TicketContract<RpcProvider>,
    address: WalletAddress,
    chain_id: OnceCell<u64>,
}

impl RpcTicketContract {
    pub fn new(provider: Arc<RpcProvider>, address: WalletAddress) -> Self {
        Self {
            contract: TicketContract::new(address.as_address(), provider.clone()),
            provider,
            address,
            chain_id: OnceCell::new(),
        }
    }

    /// Builds the provider from `config` and binds it to `address`.
    pub fn connect(config: &RpcConfig, address: WalletAddress) -> Result<Self, ContractError> {
        let mut contract = Self::new(Arc::new(config.connect()?), address);
        contract.chain_id = OnceCell::new_with(config.chain_id);
        Ok(contract)
    }

    /// Chain id used for EIP-155 signatures, asked from the node once.
    async fn chain_id(&self) -> Result<u64, ContractError> {
        self.chain_id
            .get_or_try_init(|| async {
                let id = self
                    .provider
                    .get_chainid()
                    .await
                    .map_err(|e| from_middleware(&e))?;
                tracing::debug!(chain_id = %id, "Chain id fetched");
                Ok(id.as_u64())
            })
            .await
            .copied()
    }

    async fn send_signed(
        &self,
        signer: &LocalSigner,
        request: EthTransactionRequest,
    ) -> Result<TxHash, ContractError> {
        let chain_id = self.chain_id().await?;
        let wallet = signer.wallet().clone().with_chain_id(chain_id);
        let client = SignerMiddleware::new(self.provider.as_ref().clone(), wallet);

        let pending = client
            .send_transaction(request, None)
            .await
            .map_err(|e| from_middleware(&e))?;
        Ok(pending.tx_hash().into())
    }

    async fn send_unsigned(&self, request: EthTransactionRequest) -> Result<TxHash, ContractError> {
        let pending = self
            .provider
            .send_transaction(request, None)
            .await
            .map_err(|e| from_middleware(&e))?;
        Ok(pending.tx_hash().into())
    }
}

impl fmt::Debug for RpcTicketContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // The provider URL may embed an API key.
        f.debug_struct("RpcTicketContract")
            .field("address", &self.address)
            .field("chain_id", &self.chain_id.get())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl TicketContractReader for RpcTicketContract {
    fn address(&self) -> WalletAddress {
        self.address
    }

    async fn venue(&self) -> Result<WalletAddress, ContractError> {
        let venue = self.contract.venue().call().await.map_err(from_call)?;
        Ok(venue.into())
    }

    async fn doorman(&self) -> Result<WalletAddress, ContractError> {
        let doorman = self.contract.doorman().call().await.map_err(from_call)?;
        Ok(doorman.into())
    }

    async fn balance_of(&self, account: &WalletAddress) -> Result<Wei, ContractError> {
        let balance = self
            .contract
            .balance_of(account.as_address())
            .call()
            .await
            .map_err(from_call)?;
        Ok(balance.into())
    }

    async fn ticket_price(&self) -> Result<Wei, ContractError> {
        let price = self.contract.get_ticket_price().call().await.map_err(from_call)?;
        Ok(price.into())
    }

    async fn total_tokens_sold(&self) -> Result<Wei, ContractError> {
        let sold = self
            .contract
            .get_total_tokens_sold()
            .call()
            .await
            .map_err(from_call)?;
        Ok(sold.into())
    }

    async fn total_supply(&self) -> Result<Wei, ContractError> {
        let supply = self.contract.total_supply().call().await.map_err(from_call)?;
        Ok(supply.into())
    }

    async fn ether_balance(&self, account: &WalletAddress) -> Result<Wei, ContractError> {
        let balance = self
            .provider
            .get_balance(account.as_address(), None)
            .await
            .map_err(|e| from_middleware(&e))?;
        Ok(balance.into())
    }
}

#[async_trait]
impl TransactionSender for RpcTicketContract {
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash, ContractError> {
        if tx.to != self.address {
            return Err(ContractError::Rpc {
                code: INVALID_PARAMS,
                message: format!(
                    "refusing to send to {}, expected ticket contract {}",
                    tx.to, self.address
                ),
            });
        }
        if let Some(signer) = &tx.signer {
            if signer.address() != tx.from {
                return Err(ContractError::Rpc {
                    code: INVALID_PARAMS,
                    message: format!("signer {} cannot send from {}", signer.address(), tx.from),
                });
            }
        }

        let request = EthTransactionRequest::new()
            .from(tx.from.as_address())
            .to(tx.to.as_address())
            .value(tx.value.as_wei())
            .gas(tx.gas)
            .data(tx.data());

        let hash = match &tx.signer {
            Some(signer) => self.send_signed(signer, request).await?,
            None => self.send_unsigned(request).await?,
        };

        tracing::info!(
            %hash,
            from = %tx.from,
            function = tx.call.signature(),
            signed_locally = tx.signer.is_some(),
            "Transaction submitted"
        );
        Ok(hash)
    }
}
