use portfolio_email_contracts::{Email, EmailBody, EmailService};
use portfolio_email_impl::{SmtpEmailService, SmtpEmailServiceConfig};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::TcpListener,
    sync::oneshot,
};

#[tokio::test]
async fn send_email() {
    let (port, transcript) = start_server().await;
    let sut = SmtpEmailService::new(config(port)).unwrap();

    let result = sut
        .send(Email {
            recipient: "owner@example.com".parse().unwrap(),
            subject: "New Contact Form Submission from Jane Doe".into(),
            body: EmailBody::Alternative {
                text: "Name: Jane Doe\nEmail: jane@example.com\nMessage: Hello, this is a test message."
                    .into(),
                html: "<strong>Jane Doe</strong>".into(),
            },
            reply_to: Some("jane@example.com".parse().unwrap()),
        })
        .await
        .unwrap();

    assert!(result);

    let transcript = transcript.await.unwrap();
    assert!(transcript.mail_from.contains("<noreply@example.com>"));
    assert_eq!(transcript.rcpt_to.len(), 1);
    assert!(transcript.rcpt_to[0].contains("<owner@example.com>"));
    assert!(transcript.authenticated);
    assert!(transcript.data.contains("Name: Jane Doe"));
    assert!(transcript.data.contains("Email: jane@example.com"));
    assert!(transcript
        .data
        .contains("Message: Hello, this is a test message."));
    assert!(transcript.data.contains("<strong>Jane Doe</strong>"));
}

#[tokio::test]
async fn send_email_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let sut = SmtpEmailService::new(config(port)).unwrap();

    let result = sut
        .send(Email {
            recipient: "owner@example.com".parse().unwrap(),
            subject: "Test".into(),
            body: EmailBody::Text("Test".into()),
            reply_to: None,
        })
        .await;

    assert!(result.is_err());
    assert!(sut.ping().await.is_err());
}

fn config(port: u16) -> SmtpEmailServiceConfig {
    SmtpEmailServiceConfig {
        host: "127.0.0.1".into(),
        port,
        secure: false,
        username: "user".into(),
        password: "pass".into(),
        from: "Portfolio <noreply@example.com>".parse().unwrap(),
    }
}

#[derive(Debug, Default)]
struct Transcript {
    authenticated: bool,
    mail_from: String,
    rcpt_to: Vec<String>,
    data: String,
}

/// Minimal smtp server which accepts a single message and reports what it
/// received.
async fn start_server() -> (u16, oneshot::Receiver<Transcript>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let (reader, mut writer) = stream.into_split();
        let mut lines = BufReader::new(reader).lines();
        let mut transcript = Transcript::default();
        let mut tx = Some(tx);

        writer
            .write_all(b"220 localhost ESMTP test\r\n")
            .await
            .unwrap();

        while let Ok(Some(line)) = lines.next_line().await {
            let command = line.to_ascii_uppercase();
            let reply: &[u8] = if command.starts_with("EHLO") {
                b"250-localhost\r\n250 AUTH PLAIN LOGIN\r\n"
            } else if command.starts_with("AUTH") {
                transcript.authenticated = true;
                b"235 2.7.0 Authentication successful\r\n"
            } else if command.starts_with("MAIL FROM") {
                transcript.mail_from = line.clone();
                b"250 OK\r\n"
            } else if command.starts_with("RCPT TO") {
                transcript.rcpt_to.push(line.clone());
                b"250 OK\r\n"
            } else if command == "DATA" {
                writer
                    .write_all(b"354 End data with <CR><LF>.<CR><LF>\r\n")
                    .await
                    .unwrap();
                while let Ok(Some(line)) = lines.next_line().await {
                    if line == "." {
                        break;
                    }
                    transcript.data.push_str(&line);
                    transcript.data.push('\n');
                }
                if let Some(tx) = tx.take() {
                    let _ = tx.send(std::mem::take(&mut transcript));
                }
                b"250 OK: queued\r\n"
            } else if command == "QUIT" {
                writer.write_all(b"221 Bye\r\n").await.unwrap();
                break;
            } else {
                b"250 OK\r\n"
            };
            writer.write_all(reply).await.unwrap();
        }
    });

    (port, rx)
}
