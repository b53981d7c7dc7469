#[derive(Eq, Hash, PartialEq, Debug, Clone, Copy)]
pub enum FtpCommand {
    CWD,
    CDUP,
    MKD,
    RMD,
    PWD,
    LIST,
    NOOP,
    SYST,
    QUIT,
}

impl FtpCommand {
    /// Verbs are case-insensitive; the X-prefixed forms are RFC 775 aliases.
    pub fn from_str(cmd: &str) -> Option<FtpCommand> {
        match cmd.to_ascii_uppercase().as_str() {
            "CWD" | "XCWD" => Some(FtpCommand::CWD),
            "CDUP" | "XCUP" => Some(FtpCommand::CDUP),
            "MKD" | "XMKD" => Some(FtpCommand::MKD),
            "RMD" | "XRMD" => Some(FtpCommand::RMD),
            "PWD" | "XPWD" => Some(FtpCommand::PWD),
            "LIST" => Some(FtpCommand::LIST),
            "NOOP" => Some(FtpCommand::NOOP),
            "SYST" => Some(FtpCommand::SYST),
            "QUIT" => Some(FtpCommand::QUIT),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(FtpCommand::from_str("cwd"), Some(FtpCommand::CWD));
        assert_eq!(FtpCommand::from_str("XPWD"), Some(FtpCommand::PWD));
        assert_eq!(FtpCommand::from_str("xcup"), Some(FtpCommand::CDUP));
        assert_eq!(FtpCommand::from_str("MLSD"), None);
        assert_eq!(FtpCommand::from_str(""), None);
    }
}
