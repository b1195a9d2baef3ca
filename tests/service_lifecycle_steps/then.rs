//! Then steps for service lifecycle BDD scenarios.

use super::world::LifecycleWorld;
use etcd2_registry::etcd2::client::{EtcdApiError, EtcdError};
use rstest_bdd_macros::then;

fn last_error(world: &LifecycleWorld) -> Result<&EtcdError, eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result in scenario world"))?;
    let Err(err) = result else {
        return Err(eyre::eyre!("expected the last operation to fail"));
    };
    err.downcast_ref::<EtcdError>()
        .ok_or_else(|| eyre::eyre!("expected an etcd error, got {err}"))
}

#[then(r#"the key "{key}" holds "{value}""#)]
fn key_holds(world: &LifecycleWorld, key: String, value: String) -> Result<(), eyre::Report> {
    let stored = world.cluster()?.keys.value(&key);
    if stored.as_deref() != Some(value.as_str()) {
        return Err(eyre::eyre!("expected '{key}' to hold '{value}', found {stored:?}"));
    }
    Ok(())
}

#[then(r#"the key "{key}" expires after {ttl} seconds"#)]
fn key_expires_after(world: &LifecycleWorld, key: String, ttl: u64) -> Result<(), eyre::Report> {
    let stored = world.cluster()?.keys.ttl(&key);
    if stored != Some(ttl) {
        return Err(eyre::eyre!("expected '{key}' to have ttl {ttl}, found {stored:?}"));
    }
    Ok(())
}

#[then(r#"the key "{key}" is absent"#)]
fn key_absent(world: &LifecycleWorld, key: String) -> Result<(), eyre::Report> {
    if let Some(value) = world.cluster()?.keys.value(&key) {
        return Err(eyre::eyre!("expected '{key}' to be absent, found '{value}'"));
    }
    Ok(())
}

#[then("the last operation succeeded")]
fn last_operation_succeeded(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    match world.last_result.as_ref() {
        Some(Ok(())) => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected success, got {err}")),
        None => Err(eyre::eyre!("missing operation result in scenario world")),
    }
}

#[then("the last operation failed because the key was not found")]
fn failed_key_not_found(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    if !err.api().is_some_and(EtcdApiError::is_key_not_found) {
        return Err(eyre::eyre!("expected key not found, got {err}"));
    }
    Ok(())
}

#[then("the last operation failed because etcd was unreachable")]
fn failed_unreachable(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let err = last_error(world)?;
    if !matches!(err, EtcdError::Unreachable(_)) {
        return Err(eyre::eyre!("expected an unreachable error, got {err}"));
    }
    Ok(())
}

#[then("the listing is empty")]
fn listing_is_empty(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let listed = world
        .listed
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing listing in scenario world"))?;
    if !listed.is_empty() {
        return Err(eyre::eyre!("expected no services, found {}", listed.len()));
    }
    Ok(())
}
