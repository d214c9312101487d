use alloy_primitives::{Address, address};
use coinreg::{RegistryManager, encoding::pack_values};

// Mainnet 3pool and its LP token
const TRIPOOL_ADDRESS: Address = address!("bEbc44782C7dB0a1A60Cb6fe97d0b483032FF1C7");
const TRIPOOL_LP_TOKEN: Address = address!("6c3F90f043a72FA612cbac8115EE7e52BDe6E490");
const DAI_ADDRESS: Address = address!("6B175474E89094C44Da98b954EedeAC495271d0F");
const USDC_ADDRESS: Address = address!("A0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48");
const USDT_ADDRESS: Address = address!("dAC17F958D2ee523a2206206994597C13D831ec7");

// Mainnet Compound pool (cDAI/cUSDC) and its LP token
const COMPOUND_POOL_ADDRESS: Address = address!("A2B47E3D5c44877cca798226B7B8118F9BFb7A56");
const COMPOUND_LP_TOKEN: Address = address!("845838DF265Dcd2c412A1Dc9e959c7d08537f8a2");
const CDAI_ADDRESS: Address = address!("5d3a536E4D6DbD6114cc1Ead35777bAB948E3643");
const CUSDC_ADDRESS: Address = address!("39AA39c021dfbaE8faC545936693aC917d5E7563");

// Mainnet GUSD metapool over 3pool
const GUSD_METAPOOL_ADDRESS: Address = address!("4f062658EaAF2C1ccf8C8e36D6824CDf41167956");
const GUSD_METAPOOL_LP_TOKEN: Address = address!("D2967f45c4f384DEEa880F807Be904762a3DeA07");
const GUSD_ADDRESS: Address = address!("056Fd409E1d7A124BD7017459dFEa2F387b6d5Cd");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut manager = RegistryManager::new();

    manager.add_pool_without_underlying(
        TRIPOOL_ADDRESS,
        vec![DAI_ADDRESS, USDC_ADDRESS, USDT_ADDRESS],
        TRIPOOL_LP_TOKEN,
        1,
    )?;

    manager.add_pool(
        COMPOUND_POOL_ADDRESS,
        vec![CDAI_ADDRESS, CUSDC_ADDRESS],
        vec![DAI_ADDRESS, USDC_ADDRESS],
        COMPOUND_LP_TOKEN,
        2,
    )?;

    manager.add_metapool(
        GUSD_METAPOOL_ADDRESS,
        vec![GUSD_ADDRESS, TRIPOOL_LP_TOKEN],
        GUSD_METAPOOL_LP_TOKEN,
        3,
    )?;

    let index = manager.index();
    tracing::info!(
        pools = index.pool_count(),
        coins = index.coin_count(),
        last_updated = index.last_updated(),
        "registry seeded"
    );

    for i in 0..index.coin_count() {
        let coin = index.get_coin(i);
        tracing::info!(
            ?coin,
            swap_count = index.get_coin_swap_count(coin),
            partners = ?index.swap_partners(coin),
            "registered coin"
        );
    }

    // Decimals word for the 3pool, as add_pool would submit it on chain.
    let decimals = pack_values(&[18, 6, 6])?;
    tracing::info!(%decimals, "packed 3pool decimals");

    Ok(())
}
