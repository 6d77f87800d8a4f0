//! Contract bindings generated from the deployed ABI surface.

use ethers::prelude::abigen;

abigen!(
    CovusVault,
    r#"[
        function totalAssets() external view returns (uint256)
        function totalSupply() external view returns (uint256)
        function queuedAssets() external view returns (uint256)
        function freeLiquidity() external view returns (uint256)
        function balanceOf(address owner) external view returns (uint256)
        function convertToAssets(uint256 shares) external view returns (uint256)
        function pendingRequests() external view returns (uint256)
        function head() external view returns (uint256)
        function tail() external view returns (uint256)
        function getCsSTTSTTRate() external view returns (uint256)
        function isExchangeRateHealthy() external view returns (bool)
        function paused() external view returns (bool)
        function maxSlippageBps() external view returns (uint256)
        function depositSTT(address receiver) external payable returns (uint256)
        function redeem(uint256 shares, address receiver, address owner) external returns (uint256)
        function redeemSTT(uint256 shares, uint256 minAssets, address receiver, address owner) external returns (uint256)
        function withdraw(uint256 assets, address receiver, address owner) external returns (uint256)
        function withdrawSTT(uint256 assets, uint256 maxShares, address receiver, address owner) external returns (uint256)
        function requestWithdrawal(uint256 shares, bool asNative) external returns (uint256)
        function processQueue(uint256 maxCount) external
        function approve(address spender, uint256 amount) external returns (bool)
        event WithdrawalRequested(uint256 indexed id, address indexed owner, uint256 shares, uint256 assets)
        event WithdrawalProcessed(uint256 indexed id, address indexed receiver, uint256 assets)
    ]"#
);

abigen!(
    CovusDex,
    r#"[
        function sttToToken() external payable returns (uint256)
        function tokenToStt(uint256 tokenAmount) external returns (uint256)
        function deposit() external payable returns (uint256)
        function withdraw(uint256 amount) external returns (uint256, uint256)
        function getLiquidity(address account) external view returns (uint256)
        function totalLiquidity() external view returns (uint256)
    ]"#
);
