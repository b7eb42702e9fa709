//! Process-level tests for the `skillsync` binary.

#[cfg(unix)]
mod unix_tests {
    //! Start and stop behaviour of the binary on Unix.

    use eyre::{Result, ensure, eyre};
    use std::io::{BufRead, BufReader, Read, Write};
    use std::path::PathBuf;
    use std::process::{Child, Command, ExitStatus, Stdio};
    use std::sync::mpsc;
    use std::thread;
    use std::time::{Duration, Instant};

    const EXIT_DEADLINE: Duration = Duration::from_secs(5);

    fn binary_path() -> Result<PathBuf> {
        std::env::var_os("CARGO_BIN_EXE_skillsync")
            .map(PathBuf::from)
            .ok_or_else(|| {
                eyre!("CARGO_BIN_EXE_skillsync is not set; ensure the skillsync binary is built")
            })
    }

    fn spawn_service() -> Result<Child> {
        Command::new(binary_path()?)
            .env_remove("RUST_LOG")
            .env("APP_HOST", "127.0.0.1")
            .env("APP_PORT", "0")
            .env("LOG_LEVEL", "skillsync=debug")
            .env("LOG_FORMAT", "compact")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| eyre!(err))
    }

    fn forward_stderr(child: &mut Child) -> Result<mpsc::Receiver<String>> {
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| eyre!("stderr was not captured"))?;
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            for line in BufReader::new(stderr).lines().map_while(std::result::Result::ok) {
                if sender.send(line).is_err() {
                    break;
                }
            }
        });
        Ok(receiver)
    }

    fn wait_for_log(logs: &mpsc::Receiver<String>, needle: &str) -> Result<()> {
        let deadline = Instant::now() + EXIT_DEADLINE;
        while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
            let line = logs
                .recv_timeout(remaining)
                .map_err(|err| eyre!("no `{needle}` log line: {err}"))?;
            if line.contains(needle) {
                return Ok(());
            }
        }
        Err(eyre!("timed out waiting for `{needle}`"))
    }

    fn wait_for_exit(child: &mut Child) -> Result<ExitStatus> {
        let deadline = Instant::now() + EXIT_DEADLINE;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status);
            }
            if Instant::now() >= deadline {
                child.kill()?;
                return Err(eyre!("skillsync still running after {EXIT_DEADLINE:?}"));
            }
            thread::sleep(Duration::from_millis(50));
        }
    }

    #[test]
    fn interrupt_stops_the_service_while_input_is_open() -> Result<()> {
        let mut child = spawn_service()?;
        let logs = forward_stderr(&mut child)?;
        // Keep stdin open for the whole test.
        let _stdin = child.stdin.take();
        wait_for_log(&logs, "awaiting input")?;
        thread::sleep(Duration::from_millis(300));

        let signalled = Command::new("kill")
            .args(["-INT", &child.id().to_string()])
            .status()?;
        ensure!(signalled.success(), "failed to send SIGINT");

        let status = wait_for_exit(&mut child)?;
        ensure!(status.success(), "expected a clean exit, got {status}");
        wait_for_log(&logs, "interrupted")?;
        Ok(())
    }

    #[test]
    fn end_of_input_flushes_responses_and_exits() -> Result<()> {
        let mut child = spawn_service()?;
        let logs = forward_stderr(&mut child)?;
        {
            let mut stdin = child
                .stdin
                .take()
                .ok_or_else(|| eyre!("stdin was not captured"))?;
            writeln!(
                stdin,
                r#"{{"topic":"user.created.request","payload":{{"correlationKey":"c1","id":"u1","email":"ada@example.com"}}}}"#
            )?;
        }

        let status = wait_for_exit(&mut child)?;
        ensure!(status.success(), "expected a clean exit, got {status}");
        wait_for_log(&logs, "end of input")?;

        let mut stdout = String::new();
        child
            .stdout
            .take()
            .ok_or_else(|| eyre!("stdout was not captured"))?
            .read_to_string(&mut stdout)?;
        ensure!(
            stdout.lines().count() == 1,
            "expected one response line, got {stdout:?}"
        );
        let response: serde_json::Value = serde_json::from_str(stdout.trim())?;
        ensure!(
            response["topic"] == "user.created.response",
            "unexpected topic in {response}"
        );
        ensure!(
            response["payload"]["status"] == true,
            "unexpected outcome in {response}"
        );
        Ok(())
    }
}
