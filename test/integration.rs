// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use crate::{asked, scripted_installer, HomeFixture};

use anyhow::Result;
use dotstrap::{install, AppendOutcome, InstallError, LinkOutcome, PromptError};
use indoc::indoc;
use pretty_assertions::assert_eq;
use sealed_test::prelude::*;

#[sealed_test]
fn bootstrap_fresh_home_twice() -> Result<()> {
    let fixture = HomeFixture::new()?;
    let vimrc = fixture.dotfile("vimrc", "set nu\n")?;
    let kitty = fixture.dotfile("kitty/kitty.conf", "font_size 12\n")?;
    fixture.write(".bashrc", "# distro defaults\n")?;

    for _ in 0..2 {
        let mut installer = scripted_installer("");
        installer.symlink("~/dotfiles/vimrc", "~/.vimrc")?;
        installer.symlink("~/dotfiles/kitty", "~/.config/kitty")?;
        installer.append("~/.bashrc", "source ~/dotfiles/bashrc")?;
        installer.append("~/.bashrc", "export EDITOR=vim")?;
        assert_eq!(asked(installer), "");
    }

    assert_eq!(fixture.link_target(".vimrc")?, vimrc);
    assert_eq!(fixture.link_target(".config/kitty")?, kitty.parent().unwrap());
    assert_eq!(fixture.read(".config/kitty/kitty.conf")?, "font_size 12\n");

    let expect = indoc! {r#"
        # distro defaults
        source ~/dotfiles/bashrc
        export EDITOR=vim
    "#};
    assert_eq!(fixture.read(".bashrc")?, expect);

    Ok(())
}

#[sealed_test]
fn second_run_reports_nothing_to_do() -> Result<()> {
    let fixture = HomeFixture::new()?;
    fixture.dotfile("gitconfig", "[user]\n")?;

    let mut installer = scripted_installer("");
    assert_eq!(
        installer.symlink("~/dotfiles/gitconfig", "~/.gitconfig")?,
        LinkOutcome::Created
    );
    assert_eq!(
        installer.symlink("~/dotfiles/gitconfig", "~/.gitconfig")?,
        LinkOutcome::Unchanged
    );
    assert_eq!(
        installer.append("~/.profile", "umask 022")?,
        AppendOutcome::Appended
    );
    assert_eq!(
        installer.append("~/.profile", "umask 022")?,
        AppendOutcome::AlreadyPresent
    );

    Ok(())
}

#[sealed_test]
fn answers_are_consumed_across_prompts() -> Result<()> {
    let fixture = HomeFixture::new()?;
    let vimrc = fixture.dotfile("vimrc", "set nu\n")?;
    fixture.dotfile("zshrc", "autoload -U compinit\n")?;
    fixture.write(".vimrc", "set nonu\n")?;
    fixture.write(".zshrc", "# old\n")?;

    let mut installer = scripted_installer("sure?\nyes\nnah\n");
    assert_eq!(
        installer.symlink("~/dotfiles/vimrc", "~/.vimrc")?,
        LinkOutcome::Replaced
    );
    assert_eq!(
        installer.symlink("~/dotfiles/zshrc", "~/.zshrc")?,
        LinkOutcome::Declined
    );

    let home = fixture.home();
    let expect = format!(
        "Overwrite {:?}? [y/n]Overwrite {:?}? [y/n]",
        home.join(".vimrc").display(),
        home.join(".zshrc").display()
    );
    assert_eq!(asked(installer), expect);
    assert_eq!(fixture.link_target(".vimrc")?, vimrc);
    assert_eq!(fixture.read(".zshrc")?, "# old\n");

    Ok(())
}

#[sealed_test]
fn running_out_of_answers_is_an_error() -> Result<()> {
    let fixture = HomeFixture::new()?;
    fixture.dotfile("vimrc", "set nu\n")?;
    fixture.write(".vimrc", "set nonu\n")?;

    let mut installer = scripted_installer("");
    let result = installer.symlink("~/dotfiles/vimrc", "~/.vimrc");

    assert!(matches!(
        result,
        Err(InstallError::Prompt(PromptError::EndOfInput))
    ));
    assert_eq!(fixture.read(".vimrc")?, "set nonu\n");

    Ok(())
}

#[sealed_test]
fn append_builds_missing_directories() -> Result<()> {
    let fixture = HomeFixture::new()?;
    let bashrc = fixture.home().join("x/.bashrc");

    assert_eq!(
        install::append(&bashrc, "export PATH=$PATH:/a")?,
        AppendOutcome::Appended
    );
    assert_eq!(fixture.read("x/.bashrc")?, "export PATH=$PATH:/a\n");

    Ok(())
}
