use solana_program::hash::hash;

pub const DISCRIMINATOR_LEN: usize = 8;

fn sighash(namespace: &str, name: &str) -> [u8; DISCRIMINATOR_LEN] {
    let preimage = format!("{}:{}", namespace, name);
    let mut discriminator = [0u8; DISCRIMINATOR_LEN];
    discriminator.copy_from_slice(&hash(preimage.as_bytes()).to_bytes()[..DISCRIMINATOR_LEN]);
    discriminator
}

/// First 8 bytes of every account the program owns, keyed by the account struct name
pub fn account_discriminator(account_name: &str) -> [u8; DISCRIMINATOR_LEN] {
    sighash("account", account_name)
}

/// First 8 bytes of instruction data, keyed by the snake_case instruction name
pub fn instruction_discriminator(instruction_name: &str) -> [u8; DISCRIMINATOR_LEN] {
    sighash("global", instruction_name)
}
