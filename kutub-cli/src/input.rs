use std::io::Write;

pub fn read_stdin<P>(prompt: P) -> std::io::Result<String>
where
    P: AsRef<str>
{
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut buffer = String::new();

    stdout.write_all(prompt.as_ref().as_bytes())?;
    stdout.flush()?;

    stdin.read_line(&mut buffer)?;

    Ok(buffer)
}

pub fn read_stdin_trimmed<P>(prompt: P) -> std::io::Result<String>
where
    P: AsRef<str>
{
    let given = read_stdin(prompt)?;

    Ok(given.trim().to_owned())
}

pub fn read_yn<P>(prefix: P) -> std::io::Result<bool>
where
    P: std::fmt::Display
{
    let prompt = format!("{} [y|n]: ", prefix);
    let result = read_stdin_trimmed(prompt)?;

    Ok(yes_answer(&result))
}

fn yes_answer(given: &str) -> bool {
    given.chars()
        .next()
        .map(|first| first.to_ascii_lowercase() == 'y')
        .unwrap_or(false)
}

pub fn read_password() -> std::io::Result<String> {
    rpassword::prompt_password("password: ")
}

/// asks twice until both entries match
pub fn read_password_confirmed() -> std::io::Result<String> {
    let password = rpassword::prompt_password("password: ")?;

    loop {
        let confirm = rpassword::prompt_password("confirm: ")?;

        if confirm == password {
            return Ok(password);
        }

        println!("password and confirm do not match");
    }
}
