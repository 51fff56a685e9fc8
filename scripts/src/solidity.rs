//! Definitions of Solidity functions called by the scripts

use alloy::sol;
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{sol_data, SolType, SolValue};

sol! {
    #[sol(rpc)]
    interface IVault {
        function initialize() external;
        function addCollateral(address _collateral, address _defaultStrategyAddr) external;
        function addStrategy(address _strategy) external;
    }
}

/// The `MockToken` constructor parameters, `(string, string, uint8)`
type MockTokenConstructor = (sol_data::String, sol_data::String, sol_data::Uint<8>);

/// ABI-encode the `TransparentUpgradeableProxy` constructor parameters:
/// `(address _logic, address admin_, bytes _data)`
pub fn proxy_constructor_args(implementation: Address, admin: Address, data: Bytes) -> Bytes {
    (implementation, admin, data).abi_encode_params().into()
}

/// ABI-encode the `MockToken` constructor parameters:
/// `(string name, string symbol, uint8 decimals)`
pub fn mock_token_constructor_args(name: &str, symbol: &str, decimals: u8) -> Bytes {
    MockTokenConstructor::abi_encode_params(&(name.to_string(), symbol.to_string(), decimals))
        .into()
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{hex, U256};
    use alloy_sol_types::SolCall;

    use super::*;

    #[test]
    fn test_initialize_selector() {
        assert_eq!(IVault::initializeCall::SELECTOR, hex!("8129fc1c"));
        assert_eq!(IVault::initializeCall {}.abi_encode(), hex!("8129fc1c").to_vec());
    }

    #[test]
    fn test_add_collateral_calldata_keeps_argument_order() {
        let collateral = Address::repeat_byte(0xc0);
        let strategy = Address::repeat_byte(0x57);
        let calldata = IVault::addCollateralCall {
            _collateral: collateral,
            _defaultStrategyAddr: strategy,
        }
        .abi_encode();

        assert_eq!(calldata.len(), 4 + 64);
        assert_eq!(&calldata[4 + 12..4 + 32], collateral.as_slice());
        assert_eq!(&calldata[4 + 44..4 + 64], strategy.as_slice());
    }

    #[test]
    fn test_proxy_constructor_args_with_empty_data() {
        let implementation = Address::repeat_byte(0x11);
        let admin = Address::repeat_byte(0x22);
        let encoded = proxy_constructor_args(implementation, admin, Bytes::new());

        // Two address words, the offset of `_data`, and its zero length
        assert_eq!(encoded.len(), 4 * 32);
        assert_eq!(&encoded[12..32], implementation.as_slice());
        assert_eq!(&encoded[44..64], admin.as_slice());
        assert_eq!(U256::from_be_slice(&encoded[64..96]), U256::from(96));
        assert_eq!(U256::from_be_slice(&encoded[96..128]), U256::ZERO);
    }

    #[test]
    fn test_mock_token_constructor_args() {
        let encoded = mock_token_constructor_args("MockToken", "MOCK", 18);
        let (name, symbol, decimals) = MockTokenConstructor::abi_decode_params(&encoded).unwrap();

        assert_eq!(name, "MockToken");
        assert_eq!(symbol, "MOCK");
        assert_eq!(decimals, 18);
    }

    #[test]
    fn test_mock_token_decimals_word() {
        let encoded = mock_token_constructor_args("MockToken", "MOCK", 6);

        // Two string offsets, then `decimals` as a left-padded uint8 word
        assert_eq!(U256::from_be_slice(&encoded[..32]), U256::from(96));
        assert_eq!(U256::from_be_slice(&encoded[64..96]), U256::from(6));
    }
}
