pub const MAX_NAME_CHARS: usize = 256;
pub const PHONE_PREFIX: &str = "+998";
pub const PHONE_DIGITS: usize = 9;

/// a required text field must contain something other than whitespace
pub fn required<G>(given: G) -> bool
where
    G: AsRef<str>
{
    !given.as_ref().trim().is_empty()
}

pub fn check_control<G>(
    given: G,
    max_chars: Option<usize>
) -> bool
where
    G: AsRef<str>
{
    let mut char_count = 0;

    for ch in given.as_ref().chars() {
        if ch.is_control() {
            return false;
        }

        char_count += 1;

        if let Some(max) = max_chars {
            if char_count > max {
                return false;
            }
        }
    }

    true
}

pub fn name_valid<G>(given: G) -> bool
where
    G: AsRef<str>
{
    let given_ref = given.as_ref();

    required(given_ref) && check_control(given_ref, Some(MAX_NAME_CHARS))
}

/// `+998` followed by exactly nine digits
pub fn phone_valid<G>(given: G) -> bool
where
    G: AsRef<str>
{
    let Some(rest) = given.as_ref().strip_prefix(PHONE_PREFIX) else {
        return false;
    };

    rest.len() == PHONE_DIGITS && rest.chars().all(|ch| ch.is_ascii_digit())
}

fn code_name_char(ch: char) -> bool {
    ch.is_ascii_lowercase()
        || ch.is_ascii_digit()
        || ch == '_'
        || ('а'..='я').contains(&ch)
        || matches!(ch, 'ё' | 'ғ' | 'қ' | 'ҳ' | 'ў')
}

/// derives a permission code name from a human readable name.
///
/// lowercases the name, collapses runs of whitespace into `_` and drops
/// anything that is not a latin/cyrillic letter, digit or underscore.
pub fn code_name_from<G>(name: G) -> String
where
    G: AsRef<str>
{
    let lowered = name.as_ref().to_lowercase();
    let mut rtn = String::with_capacity(lowered.len());
    let mut in_space = false;

    for ch in lowered.chars() {
        if ch.is_whitespace() {
            if !in_space {
                rtn.push('_');
                in_space = true;
            }

            continue;
        }

        in_space = false;

        if code_name_char(ch) {
            rtn.push(ch);
        }
    }

    rtn
}

pub fn code_name_valid<G>(given: G) -> bool
where
    G: AsRef<str>
{
    let given_ref = given.as_ref();

    !given_ref.is_empty() && given_ref.chars().all(code_name_char)
}
