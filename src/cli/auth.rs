use anyhow::Result;

use crate::auth::sign_in;
use crate::core::AppConfig;
use crate::state::AppState;

pub fn login(config: &AppConfig, name: Option<&str>, email: Option<&str>) -> Result<()> {
    let mut state = AppState::open(config)?;
    let user = sign_in(name, email)?;
    println!("Signed in as {} <{}>", user.name, user.email);
    state.login(user)?;
    Ok(())
}

pub fn logout(config: &AppConfig) -> Result<()> {
    let mut state = AppState::open(config)?;
    state.logout()?;
    println!("{}", state.translations().logout);
    Ok(())
}
