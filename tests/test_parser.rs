mod common;

use common::ChunkReader;
use rawhttp::http::buffer::ReadBuffer;
use rawhttp::http::parser::{
    ParseError, parse_request_line, request_from_reader, request_from_reader_with,
};
use rawhttp::http::request::{ParseState, Request, RequestLine};

async fn parse_chunked(data: &[u8], chunk_size: usize) -> Result<Request, ParseError> {
    let mut reader = ChunkReader::new(data, chunk_size);
    request_from_reader(&mut reader).await
}

#[test]
fn test_parse_request_line() {
    let data = b"GET /path HTTP/1.1\r\nHost: x\r\n";
    let (line, consumed) = parse_request_line(data).unwrap().unwrap();

    assert_eq!(
        line,
        RequestLine {
            method: "GET".to_string(),
            target: "/path".to_string(),
            http_version: "1.1".to_string(),
        }
    );
    assert_eq!(consumed, "GET /path HTTP/1.1".len() + 2);
}

#[test]
fn test_parse_request_line_lowercase_method() {
    let result = parse_request_line(b"get /path HTTP/1.1\r\n");
    assert!(matches!(result, Err(ParseError::InvalidMethod)));
}

#[test]
fn test_parse_request_line_mixed_case_and_digits() {
    assert!(matches!(
        parse_request_line(b"Get / HTTP/1.1\r\n"),
        Err(ParseError::InvalidMethod)
    ));
    assert!(matches!(
        parse_request_line(b"G3T / HTTP/1.1\r\n"),
        Err(ParseError::InvalidMethod)
    ));
}

#[test]
fn test_parse_request_line_wrong_part_count() {
    assert!(matches!(
        parse_request_line(b"/coffee HTTP/1.1\r\n"),
        Err(ParseError::InvalidRequestLine)
    ));
    assert!(matches!(
        parse_request_line(b"GET  / HTTP/1.1\r\n"),
        Err(ParseError::InvalidRequestLine)
    ));
    assert!(matches!(
        parse_request_line(b"GET / HTTP/1.1 extra\r\n"),
        Err(ParseError::InvalidRequestLine)
    ));
}

#[test]
fn test_parse_request_line_out_of_order() {
    let result = parse_request_line(b"/coffee POST HTTP/1.1\r\n");
    assert!(matches!(result, Err(ParseError::InvalidMethod)));
}

#[test]
fn test_parse_request_line_bad_target() {
    let result = parse_request_line(b"GET coffee HTTP/1.1\r\n");
    assert!(matches!(result, Err(ParseError::InvalidTarget)));
}

#[test]
fn test_parse_request_line_bad_version() {
    for line in [
        &b"GET / HTTP/1.0\r\n"[..],
        b"GET / HTTP/2\r\n",
        b"GET / http/1.1\r\n",
        b"GET / HTTP1.1\r\n",
    ] {
        let result = parse_request_line(line);
        assert!(matches!(result, Err(ParseError::InvalidVersion)));
    }
}

#[tokio::test]
async fn test_request_line_chunking_invariance() {
    let data = b"GET /coffee HTTP/1.1\r\nHost: localhost:42069\r\nUser-Agent: curl/7.81.0\r\nAccept: */*\r\n\r\n";
    let expected = parse_chunked(data, data.len()).await.unwrap();

    for chunk_size in 1..=data.len() {
        let req = parse_chunked(data, chunk_size).await.unwrap();
        assert_eq!(req.request_line, expected.request_line, "chunk size {chunk_size}");
        assert_eq!(req.headers, expected.headers, "chunk size {chunk_size}");
    }

    assert_eq!(expected.method(), "GET");
    assert_eq!(expected.target(), "/coffee");
    assert_eq!(expected.request_line.http_version, "1.1");
}

#[tokio::test]
async fn test_standard_headers() {
    let data = b"GET / HTTP/1.1\r\nHost: localhost:42069\r\nUser-Agent: curl/7.81.0\r\nAccept: */*\r\n\r\n";
    let req = parse_chunked(data, 3).await.unwrap();

    assert_eq!(req.header("host"), Some("localhost:42069"));
    assert_eq!(req.header("user-agent"), Some("curl/7.81.0"));
    assert_eq!(req.header("accept"), Some("*/*"));
    assert_eq!(req.state(), ParseState::Done);
}

#[tokio::test]
async fn test_duplicate_headers_not_reapplied_across_chunks() {
    let data = b"GET / HTTP/1.1\r\nAccept: text/plain\r\nAccept: application/json\r\n\r\n";

    for chunk_size in 1..=data.len() {
        let req = parse_chunked(data, chunk_size).await.unwrap();
        assert_eq!(req.headers.len(), 1);
        assert_eq!(
            req.header("accept"),
            Some("text/plain, application/json"),
            "chunk size {chunk_size}"
        );
    }
}

#[tokio::test]
async fn test_empty_headers() {
    let req = parse_chunked(b"GET / HTTP/1.1\r\n\r\n", 2).await.unwrap();

    assert!(req.headers.is_empty());
    assert!(req.body.is_empty());
}

#[tokio::test]
async fn test_malformed_header() {
    let result = parse_chunked(b"GET / HTTP/1.1\r\nHost localhost:42069\r\n\r\n", 3).await;
    assert!(matches!(result, Err(ParseError::InvalidHeaderName)));

    let result = parse_chunked(b"GET / HTTP/1.1\r\nHost localhost\r\n\r\n", 3).await;
    assert!(matches!(result, Err(ParseError::InvalidHeaderLine)));
}

#[tokio::test]
async fn test_missing_end_of_headers() {
    let result = parse_chunked(b"GET / HTTP/1.1\r\nHost: localhost:42069\r\n", 3).await;
    assert!(matches!(result, Err(ParseError::UnexpectedEof)));
}

#[tokio::test]
async fn test_empty_stream() {
    let result = parse_chunked(b"", 3).await;
    assert!(matches!(result, Err(ParseError::UnexpectedEof)));
}

#[tokio::test]
async fn test_truncated_request_line() {
    let result = parse_chunked(b"GET / HTT", 4).await;
    assert!(matches!(result, Err(ParseError::UnexpectedEof)));
}

#[tokio::test]
async fn test_standard_body() {
    let data = b"POST /submit HTTP/1.1\r\nHost: localhost:42069\r\nContent-Length: 13\r\n\r\nhello world!\n";

    for chunk_size in 1..=data.len() {
        let req = parse_chunked(data, chunk_size).await.unwrap();
        assert_eq!(req.body, b"hello world!\n", "chunk size {chunk_size}");
    }
}

#[tokio::test]
async fn test_binary_body() {
    let data = b"POST /upload HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\r\n\xff";
    let req = parse_chunked(data, 5).await.unwrap();

    assert_eq!(req.body, vec![0x00, b'\r', b'\n', 0xff]);
}

#[tokio::test]
async fn test_zero_content_length() {
    let data = b"POST /submit HTTP/1.1\r\nContent-Length: 0\r\n\r\n";
    let req = parse_chunked(data, 3).await.unwrap();

    assert!(req.body.is_empty());
}

#[tokio::test]
async fn test_no_content_length_ignores_trailing_bytes() {
    let data = b"POST /submit HTTP/1.1\r\nHost: localhost:42069\r\n\r\nignored";
    let req = parse_chunked(data, data.len()).await.unwrap();

    assert!(req.body.is_empty());
    assert!(req.is_done());
}

#[tokio::test]
async fn test_body_shorter_than_content_length() {
    let data = b"POST /submit HTTP/1.1\r\nContent-Length: 20\r\n\r\npartial content";

    for chunk_size in [1, 3, data.len()] {
        let result = parse_chunked(data, chunk_size).await;
        assert!(matches!(result, Err(ParseError::BodyTooShort)));
    }
}

#[tokio::test]
async fn test_body_longer_than_content_length() {
    let data = b"POST /submit HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello world";

    for chunk_size in 1..=data.len() {
        let result = parse_chunked(data, chunk_size).await;
        assert!(
            matches!(result, Err(ParseError::BodyTooLong)),
            "chunk size {chunk_size}"
        );
    }
}

#[tokio::test]
async fn test_body_excess_after_read_boundary() {
    let head = b"POST /submit HTTP/1.1\r\nContent-Length: 5\r\n\r\n";
    let mut data = head.to_vec();
    data.extend_from_slice(b"hello world");

    // Chunks end exactly where the declared body does.
    let result = parse_chunked(&data, head.len() + 5).await;
    assert!(matches!(result, Err(ParseError::BodyTooLong)));
}

#[test]
fn test_body_stays_open_until_end_of_stream() {
    let mut req = Request::new();
    let head = b"PUT /x HTTP/1.1\r\nContent-Length: 2\r\n\r\n";
    let mut offset = 0;
    while req.state() != ParseState::ParsingBody {
        offset += req.parse(&head[offset..]).unwrap();
    }

    assert_eq!(req.parse(b"ok").unwrap(), 2);
    assert_eq!(req.state(), ParseState::ParsingBody);

    assert_eq!(req.parse(b"!").unwrap(), 1);
    req.end_of_stream().unwrap();
    assert!(matches!(req.parse(&[]), Err(ParseError::BodyTooLong)));
}

#[tokio::test]
async fn test_invalid_content_length() {
    let data = b"POST /submit HTTP/1.1\r\nContent-Length: abc\r\n\r\nhello";
    let result = parse_chunked(data, 4).await;
    assert!(matches!(result, Err(ParseError::InvalidContentLength(v)) if v == "abc"));

    let data = b"POST /submit HTTP/1.1\r\nContent-Length: -5\r\n\r\nhello";
    let result = parse_chunked(data, 4).await;
    assert!(matches!(result, Err(ParseError::InvalidContentLength(_))));
}

#[tokio::test]
async fn test_small_buffer_grows_for_long_lines() {
    let target = format!("/{}", "a".repeat(200));
    let data = format!("GET {target} HTTP/1.1\r\nX-Long: {}\r\n\r\n", "b".repeat(300));
    let mut reader = ChunkReader::new(&data, 7);

    let req = request_from_reader_with(&mut reader, ReadBuffer::with_capacity(8))
        .await
        .unwrap();

    assert_eq!(req.target(), target);
    assert_eq!(req.header("x-long").map(str::len), Some(300));
}

#[test]
fn test_parse_step_consumes_one_unit() {
    let mut req = Request::new();
    let data = b"GET / HTTP/1.1\r\nHost: a\r\n\r\n";

    let n = req.parse(data).unwrap();
    assert_eq!(n, "GET / HTTP/1.1\r\n".len());
    assert_eq!(req.state(), ParseState::ParsingHeaders);

    let n = req.parse(&data[16..]).unwrap();
    assert_eq!(n, "Host: a\r\n".len());
    assert_eq!(req.state(), ParseState::ParsingHeaders);

    let n = req.parse(&data[25..]).unwrap();
    assert_eq!(n, 2);
    assert_eq!(req.state(), ParseState::ParsingBody);

    let n = req.parse(&[]).unwrap();
    assert_eq!(n, 0);
    assert_eq!(req.state(), ParseState::Done);
}

#[test]
fn test_end_of_stream_before_headers_complete() {
    let mut req = Request::new();
    req.parse(b"GET / HTTP/1.1\r\n").unwrap();

    assert!(matches!(req.end_of_stream(), Err(ParseError::UnexpectedEof)));
}

#[test]
fn test_end_of_stream_validates_body() {
    let mut req = Request::new();
    let head = b"PUT /x HTTP/1.1\r\nContent-Length: 4\r\n\r\n";
    let mut offset = 0;
    while req.state() != ParseState::ParsingBody {
        offset += req.parse(&head[offset..]).unwrap();
    }

    req.parse(b"ab").unwrap();
    assert_eq!(req.state(), ParseState::ParsingBody);

    req.end_of_stream().unwrap();
    assert_eq!(req.state(), ParseState::ParsingBodyValidation);
    assert!(matches!(req.parse(&[]), Err(ParseError::BodyTooShort)));
}
