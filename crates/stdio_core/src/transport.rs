use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::{
    capability::Capability,
    dispatcher::Dispatcher,
    errors::RpcResult,
    protocol::Response,
};

/// Serve one caller over a line-oriented byte stream
///
/// Writes the announcement first, then answers each input line in order with
/// exactly one output line. Returns cleanly when the input reaches end of stream.
pub async fn serve<C, R, W>(dispatcher: &Dispatcher<C>, mut reader: R, mut writer: W) -> RpcResult<()>
where
    C: Capability,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    write_response(&mut writer, &dispatcher.announcement()).await?;

    let mut line = Vec::new();
    let mut handled: u64 = 0;
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line).await? == 0 {
            break;
        }

        let response = dispatcher.handle_line(trim_line_ending(&line)).await;
        write_response(&mut writer, &response).await?;
        handled += 1;
    }

    tracing::info!(handled, "input closed, shutting down");
    Ok(())
}

/// Serve the given capability on this process's stdin/stdout
pub async fn serve_stdio<C: Capability>(capability: C) -> RpcResult<()> {
    let info = capability.server_info();
    tracing::info!(server = info.name, version = info.version, "serving on stdio");

    let dispatcher = Dispatcher::new(capability);
    serve(
        &dispatcher,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await
}

async fn write_response<W: AsyncWrite + Unpin>(writer: &mut W, response: &Response) -> RpcResult<()> {
    let mut line = response.to_line()?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::tests::EchoCapability;
    use serde_json::{Value, json};

    async fn run(input: &[u8]) -> Vec<Value> {
        let mut builder = tokio_test::io::Builder::new();
        if !input.is_empty() {
            builder.read(input);
        }
        let reader = builder.build();
        let mut output = Vec::new();

        serve(
            &Dispatcher::new(EchoCapability),
            BufReader::new(reader),
            &mut output,
        )
        .await
        .unwrap();

        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_announcement_precedes_responses() {
        let lines = run(b"").await;

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["id"], Value::Null);
        assert!(lines[0]["result"]["tools"].is_array());
    }

    #[tokio::test]
    async fn test_one_response_per_line_in_order() {
        let input = concat!(
            "{\"id\":1,\"method\":\"test/echo\",\"params\":{\"text\":\"a\"}}\n",
            "not json\n",
            "\n",
            "{\"id\":2,\"method\":\"test/missing\"}\r\n",
            "{\"id\":3,\"method\":\"test/fail\"}\n",
            "{\"id\":4,\"method\":\"test/echo\",\"params\":{\"text\":\"b\"}}",
        );

        let lines = run(input.as_bytes()).await;
        let responses = &lines[1..];

        assert_eq!(responses.len(), 6);
        assert_eq!(responses[0], json!({"jsonrpc": "2.0", "id": 1, "result": {"text": "a"}}));
        assert_eq!(responses[1]["id"], Value::Null);
        assert_eq!(responses[1]["error"]["code"], -32700);
        assert_eq!(responses[2]["error"]["code"], -32700);
        assert_eq!(responses[3]["id"], 2);
        assert_eq!(responses[3]["error"]["message"], "Unknown method: test/missing");
        assert_eq!(responses[4]["id"], 3);
        assert!(responses[4].get("result").is_none());
        assert_eq!(responses[5]["result"]["text"], "b");
    }
}
