/// Turns a client path argument into an absolute path, using `current_dir`
/// as the base for relative arguments.
///
/// Only the separator between base and argument and a single trailing
/// slash are handled. "." and ".." segments and doubled slashes are passed
/// through untouched; drivers deal with those.
pub fn abs_path(current_dir: &str, arg: &str) -> String {
    let mut path = if arg.starts_with('/') {
        arg.to_string()
    } else {
        let mut path = current_dir.to_string();
        if path != "/" {
            path.push('/');
        }
        path.push_str(arg);
        path
    };

    if path != "/" && path.ends_with('/') {
        path.pop();
    }

    path
}
