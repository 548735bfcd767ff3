//! Ticket contract bindings and the calls the front-end makes.
//!
//! The bindings are generated by `abigen!` from the human-readable ABI of
//! the functions below. [`ContractCall`] is the domain's view of a write or
//! read; it encodes through the generated call types.

use ethers::abi::AbiEncode;
use ethers::contract::abigen;
use ethers::types::U256;

use crate::domain::foundation::{WalletAddress, Wei};

abigen!(
    TicketContract,
    r#"[
        function venue() external view returns (address)
        function doorman() external view returns (address)
        function balanceOf(address account) external view returns (uint256)
        function getTicketPrice() external view returns (uint256)
        function getTotalTokensSold() external view returns (uint256)
        function totalSupply() external view returns (uint256)
        function buyTicket(uint256 numTickets) external payable
        function getRefund(uint256 numTickets) external
        function returnTicket(uint256 numTickets) external
        function withdrawFunds(uint256 amount) external
        function depositFunds() external payable
        function updateTicketPrice(uint256 newPrice) external
    ]"#
);

/// A call to one of the ticket contract's functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractCall {
    Venue,
    Doorman,
    BalanceOf(WalletAddress),
    TicketPrice,
    TotalTokensSold,
    TotalSupply,
    BuyTicket { quantity: u64 },
    GetRefund { quantity: u64 },
    ReturnTicket { quantity: u64 },
    WithdrawFunds { amount: Wei },
    DepositFunds,
    UpdateTicketPrice { new_price: Wei },
}

impl ContractCall {
    pub fn signature(&self) -> &'static str {
        match self {
            ContractCall::Venue => "venue()",
            ContractCall::Doorman => "doorman()",
            ContractCall::BalanceOf(_) => "balanceOf(address)",
            ContractCall::TicketPrice => "getTicketPrice()",
            ContractCall::TotalTokensSold => "getTotalTokensSold()",
            ContractCall::TotalSupply => "totalSupply()",
            ContractCall::BuyTicket { .. } => "buyTicket(uint256)",
            ContractCall::GetRefund { .. } => "getRefund(uint256)",
            ContractCall::ReturnTicket { .. } => "returnTicket(uint256)",
            ContractCall::WithdrawFunds { .. } => "withdrawFunds(uint256)",
            ContractCall::DepositFunds => "depositFunds()",
            ContractCall::UpdateTicketPrice { .. } => "updateTicketPrice(uint256)",
        }
    }

    /// Functions that accept ether alongside the call.
    pub fn is_payable(&self) -> bool {
        matches!(self, ContractCall::BuyTicket { .. } | ContractCall::DepositFunds)
    }

    /// Read-only view functions.
    pub fn is_view(&self) -> bool {
        matches!(
            self,
            ContractCall::Venue
                | ContractCall::Doorman
                | ContractCall::BalanceOf(_)
                | ContractCall::TicketPrice
                | ContractCall::TotalTokensSold
                | ContractCall::TotalSupply
        )
    }

    /// The generated call value for this function.
    pub fn to_abi(&self) -> TicketContractCalls {
        match *self {
            ContractCall::Venue => TicketContractCalls::Venue(VenueCall),
            ContractCall::Doorman => TicketContractCalls::Doorman(DoormanCall),
            ContractCall::BalanceOf(account) => TicketContractCalls::BalanceOf(BalanceOfCall {
                account: account.into(),
            }),
            ContractCall::TicketPrice => TicketContractCalls::GetTicketPrice(GetTicketPriceCall),
            ContractCall::TotalTokensSold => {
                TicketContractCalls::GetTotalTokensSold(GetTotalTokensSoldCall)
            }
            ContractCall::TotalSupply => TicketContractCalls::TotalSupply(TotalSupplyCall),
            ContractCall::BuyTicket { quantity } => TicketContractCalls::BuyTicket(BuyTicketCall {
                num_tickets: U256::from(quantity),
            }),
            ContractCall::GetRefund { quantity } => TicketContractCalls::GetRefund(GetRefundCall {
                num_tickets: U256::from(quantity),
            }),
            ContractCall::ReturnTicket { quantity } => {
                TicketContractCalls::ReturnTicket(ReturnTicketCall {
                    num_tickets: U256::from(quantity),
                })
            }
            ContractCall::WithdrawFunds { amount } => {
                TicketContractCalls::WithdrawFunds(WithdrawFundsCall {
                    amount: amount.as_wei(),
                })
            }
            ContractCall::DepositFunds => TicketContractCalls::DepositFunds(DepositFundsCall),
            ContractCall::UpdateTicketPrice { new_price } => {
                TicketContractCalls::UpdateTicketPrice(UpdateTicketPriceCall {
                    new_price: new_price.as_wei(),
                })
            }
        }
    }

    /// Selector followed by the encoded arguments.
    pub fn encode(&self) -> Vec<u8> {
        self.to_abi().encode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::abi::AbiDecode;
    use ethers::contract::EthCall;

    #[test]
    fn well_known_selectors() {
        assert_eq!(BalanceOfCall::selector(), [0x70, 0xa0, 0x82, 0x31]);
        assert_eq!(TotalSupplyCall::selector(), [0x18, 0x16, 0x0d, 0xdd]);
        assert_eq!(
            &ContractCall::BalanceOf(WalletAddress::from_bytes([0; 20])).encode()[..4],
            &[0x70, 0xa0, 0x82, 0x31]
        );
    }

    #[test]
    fn signatures_match_the_bindings() {
        assert_eq!(ContractCall::BuyTicket { quantity: 1 }.signature(), BuyTicketCall::abi_signature());
        assert_eq!(ContractCall::TicketPrice.signature(), GetTicketPriceCall::abi_signature());
        assert_eq!(
            ContractCall::UpdateTicketPrice { new_price: Wei::ZERO }.signature(),
            UpdateTicketPriceCall::abi_signature()
        );
    }

    #[test]
    fn getter_calldata_is_selector_only() {
        assert_eq!(ContractCall::Venue.encode().len(), 4);
        assert_eq!(ContractCall::DepositFunds.encode().len(), 4);
    }

    #[test]
    fn balance_of_pads_address_left() {
        let address = WalletAddress::from_bytes([0xaa; 20]);
        let data = ContractCall::BalanceOf(address).encode();

        assert_eq!(
            hex::encode(&data),
            format!("70a08231{}{}", "00".repeat(12), "aa".repeat(20))
        );
    }

    #[test]
    fn quantity_decodes_back_from_calldata() {
        let data = ContractCall::BuyTicket { quantity: 3 }.encode();
        assert_eq!(data.len(), 36);

        match TicketContractCalls::decode(&data).unwrap() {
            TicketContractCalls::BuyTicket(call) => assert_eq!(call.num_tickets, U256::from(3)),
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn amounts_beyond_128_bits_are_encoded_whole() {
        let price = Wei::from_wei(U256::from(u128::MAX) * U256::from(4));
        let data = ContractCall::UpdateTicketPrice { new_price: price }.encode();

        match TicketContractCalls::decode(&data).unwrap() {
            TicketContractCalls::UpdateTicketPrice(call) => assert_eq!(call.new_price, price.as_wei()),
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn payable_and_view_flags() {
        assert!(ContractCall::BuyTicket { quantity: 1 }.is_payable());
        assert!(ContractCall::DepositFunds.is_payable());
        assert!(!ContractCall::GetRefund { quantity: 1 }.is_payable());
        assert!(ContractCall::Venue.is_view());
        assert!(!ContractCall::WithdrawFunds { amount: Wei::ZERO }.is_view());
    }
}
