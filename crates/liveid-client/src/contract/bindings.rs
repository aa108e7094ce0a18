use ethers::contract::abigen;

abigen!(
    LivenessRegistry,
    r#"[
        function getData(string key) external view returns (bytes)
        function setData(string key, bytes value) external returns (bool)
        function isAvailable() external view returns (bool)
        event DataStored(string indexed key, address indexed writer)
    ]"#
);
