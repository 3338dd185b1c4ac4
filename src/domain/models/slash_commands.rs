#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .split_whitespace()
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        if args.is_empty() {
            return None;
        }
        let prefix = args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_help()
            || cmd.is_story()
            || cmd.is_scene_count()
            || cmd.is_aspect_ratio()
            || cmd.is_generate()
            || cmd.is_add_more()
            || cmd.is_image()
            || cmd.is_thumbnail()
            || cmd.is_list()
            || cmd.is_copy()
            || cmd.is_save()
            || cmd.is_key()
        {
            return Some(cmd);
        }

        return None;
    }

    /// Everything after the command, with the original spacing collapsed.
    pub fn rest(&self) -> String {
        return self.args.join(" ");
    }

    pub fn first_arg(&self) -> Option<&str> {
        return self.args.first().map(|arg| return arg.as_str());
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    pub fn is_story(&self) -> bool {
        return ["/s", "/story"].contains(&self.command.as_str());
    }

    pub fn is_scene_count(&self) -> bool {
        return ["/n", "/scenes"].contains(&self.command.as_str());
    }

    pub fn is_aspect_ratio(&self) -> bool {
        return ["/r", "/ratio"].contains(&self.command.as_str());
    }

    pub fn is_generate(&self) -> bool {
        return ["/g", "/generate"].contains(&self.command.as_str());
    }

    pub fn is_add_more(&self) -> bool {
        return ["/m", "/more"].contains(&self.command.as_str());
    }

    pub fn is_image(&self) -> bool {
        return ["/i", "/image"].contains(&self.command.as_str());
    }

    pub fn is_thumbnail(&self) -> bool {
        return ["/t", "/thumbnail"].contains(&self.command.as_str());
    }

    pub fn is_list(&self) -> bool {
        return ["/l", "/list"].contains(&self.command.as_str());
    }

    pub fn is_copy(&self) -> bool {
        return ["/c", "/copy"].contains(&self.command.as_str());
    }

    pub fn is_save(&self) -> bool {
        return ["/w", "/save"].contains(&self.command.as_str());
    }

    pub fn is_key(&self) -> bool {
        return ["/k", "/key"].contains(&self.command.as_str());
    }
}
