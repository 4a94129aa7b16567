/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Decodes a URL query value with JavaScript's decodeURIComponent
pub(crate) fn js_decode_component(raw: &str) -> String {
    let raw = raw.replace('+', " ");
    js_sys::decode_uri_component(&raw)
        .map(String::from)
        .unwrap_or(raw)
}

/// Turns `?name=Ana&level=easy&vv` into `["memora", "--name=Ana", "--level=easy", "-vv"]`.
///
/// Keys rejected by `is_known` are dropped, so foreign parameters on a shared link
/// do not spoil the rest of the query.
pub(crate) fn query_to_args(
    search: &str,
    decode: impl Fn(&str) -> String,
    is_known: impl Fn(&str) -> bool,
) -> Vec<String> {
    let mut args = vec!["memora".to_string()];
    for pair in search.trim_start_matches('?').split('&') {
        if pair.is_empty() {
            continue;
        }
        let arg = match pair.split_once('=') {
            Some((key, value)) if is_known(key) => format!("--{}={}", key, decode(value)),
            None if pair.chars().all(|c| c == 'v' || c == 'q') => format!("-{}", pair),
            None if is_known(pair) => format!("--{}", pair),
            _ => {
                log::debug!("Ignoring URL parameter {:?}", pair);
                continue;
            }
        };
        args.push(arg);
    }
    args
}

/// Formats whole seconds as `m:ss`.
pub(crate) fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
