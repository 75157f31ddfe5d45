use tokio::process::Child;

/// SIGKILL the child's entire process group, then reap the zombie.
///
/// Requires the child to have been spawned with `process_group(0)` so that
/// its PGID equals its PID — killing only the direct child would orphan
/// anything it spawned (`sh -c` wrappers in particular). No-op if the child
/// has already exited or the PID cannot be represented as `i32`.
pub(crate) async fn terminate(child: &mut Child) {
    if let Some(pid) = child.id()
        && let Ok(pid) = i32::try_from(pid)
    {
        let pgid = nix::unistd::Pid::from_raw(pid);
        let _ = nix::sys::signal::killpg(pgid, nix::sys::signal::Signal::SIGKILL);
    }
    let _ = child.wait().await;
}
