//! ABI bindings for the calls exchanged between the two bridges.
//!
//! Every cross-domain message payload is the ABI-encoded calldata of one of these functions,
//! exactly as the receiving contract would see it.

#![allow(missing_docs)]

use alloy_sol_types::sol;

sol! {
    /// Calls the settlement-layer bridge accepts from the rollup bridge.
    #[derive(Debug, PartialEq, Eq)]
    interface IL1ECOBridge {
        /// Releases escrow for a withdrawal burned on the rollup. `amount` is in base units.
        function finalizeERC20Withdrawal(
            address l1Token,
            address l2Token,
            address from,
            address to,
            uint256 amount,
            bytes data
        ) external;
    }

    /// Calls the rollup bridge accepts from the settlement-layer bridge.
    #[derive(Debug, PartialEq, Eq)]
    interface IL2ECOBridge {
        /// Mints a deposit escrowed on the settlement layer. `amount` is in base units.
        function finalizeDeposit(
            address l1Token,
            address l2Token,
            address from,
            address to,
            uint256 amount,
            bytes data
        ) external;

        /// Applies the settlement-layer inflation multiplier to the rollup ledger.
        function rebase(uint256 inflationMultiplier) external;

        /// Swaps the implementation behind the rollup token proxy.
        function upgradeECO(address implementation, uint256 blockNumber) external;

        /// Swaps the implementation behind the rollup bridge proxy.
        function upgradeSelf(address implementation, uint256 blockNumber) external;
    }

    /// The relay entry point of the cross-domain messenger. Only used to derive message hashes.
    #[derive(Debug, PartialEq, Eq)]
    interface ICrossDomainMessenger {
        function relayMessage(
            address target,
            address sender,
            bytes message,
            uint256 messageNonce
        ) external;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, Bytes, U256};
    use alloy_sol_types::{SolCall, SolInterface};

    #[test]
    fn test_decode_dispatches_on_selector() {
        let call = IL2ECOBridge::rebaseCall { inflationMultiplier: U256::from(5) };
        let decoded = IL2ECOBridge::IL2ECOBridgeCalls::abi_decode(&call.abi_encode(), true).unwrap();
        assert_eq!(decoded, IL2ECOBridge::IL2ECOBridgeCalls::rebase(call));
    }

    #[test]
    fn test_decode_finalize_deposit() {
        let call = IL2ECOBridge::finalizeDepositCall {
            l1Token: address!("3e87d4d9e69163e7590f9b39a70853cf25e5abe3"),
            l2Token: address!("e6ac2d9e9feb17020721127777eb78afcdf47f00"),
            from: address!("1111111111111111111111111111111111111111"),
            to: address!("2222222222222222222222222222222222222222"),
            amount: U256::from(500),
            data: Bytes::from_static(&[0xde, 0xad]),
        };
        let encoded = call.abi_encode();
        assert_eq!(&encoded[..4], &IL2ECOBridge::finalizeDepositCall::SELECTOR);

        let IL2ECOBridge::IL2ECOBridgeCalls::finalizeDeposit(decoded) =
            IL2ECOBridge::IL2ECOBridgeCalls::abi_decode(&encoded, true).unwrap()
        else {
            panic!("wrong variant");
        };
        assert_eq!(decoded, call);
    }

    #[test]
    fn test_unknown_selector_rejected() {
        let call = IL1ECOBridge::finalizeERC20WithdrawalCall {
            l1Token: Default::default(),
            l2Token: Default::default(),
            from: Default::default(),
            to: Default::default(),
            amount: U256::ZERO,
            data: Bytes::new(),
        };
        assert!(IL2ECOBridge::IL2ECOBridgeCalls::abi_decode(&call.abi_encode(), true).is_err());
    }
}
