//! Decodes biz tags given as arguments, or one per line on stdin.

use std::io::{self, BufRead};

use cms_admin::{parse, BizTag};

fn describe(tag: &BizTag) -> String {
    match tag {
        BizTag::Preset { list } => {
            let labels: Vec<&str> = list.iter().map(|o| o.label()).collect();
            format!("preset [{}]", labels.join(", "))
        }
        BizTag::LinkModel {
            target_name,
            formatter,
            ..
        } => match formatter {
            Some(f) => format!("linkModel -> {target_name} (formatter {f})"),
            None => format!("linkModel -> {target_name}"),
        },
        BizTag::Assets { accept, image } => {
            let accept = accept.as_deref().unwrap_or("*");
            match image.as_ref().and_then(|i| i.aspect) {
                Some(aspect) => format!("assets accept={accept} aspect={aspect}"),
                None => format!("assets accept={accept}"),
            }
        }
        other => other.kind().to_string(),
    }
}

fn report(line: &str) {
    match parse(line) {
        Ok(Some(tag)) => println!("{}", describe(&tag)),
        Ok(None) => println!("(not a tag) {line}"),
        Err(e) => println!("error: {e}"),
    }
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        for arg in &args {
            report(arg);
        }
        return;
    }

    for line in io::stdin().lock().lines() {
        match line {
            Ok(line) if line.trim().is_empty() => {}
            Ok(line) => report(line.trim()),
            Err(e) => {
                eprintln!("read failed: {e}");
                break;
            }
        }
    }
}
